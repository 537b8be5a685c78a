use std::io::{self, BufRead, Write};

use anyhow::Context;
use drink_app::{dispatch, AppError, Command, Config, Outcome, TerminalRenderer, UreqTransport};
use drink_core::{DrinkClient, DrinkViewModel};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let config = Config::load().context("loading configuration")?;
    info!(api_url = %config.api_url, "starting drink front-end");

    let mut vm = DrinkViewModel::new(
        DrinkClient::new(&config.api_url),
        UreqTransport::new(),
        TerminalRenderer::new(io::stdout()),
    );
    // A failed first load is already on screen; the user can retry with `load`.
    if let Err(e) = vm.start() {
        warn!(error = %e, "initial load failed");
    }

    let mut stdout = io::stdout();
    for line in io::stdin().lock().lines() {
        let line = line.context("reading input")?;
        if line.trim().is_empty() {
            continue;
        }
        let result = line
            .parse::<Command>()
            .map_err(AppError::from)
            .and_then(|command| dispatch(&mut vm, command));
        match result {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Continue(Some(message))) => writeln!(stdout, "{message}")?,
            Ok(Outcome::Continue(None)) => {}
            // every API call goes through the view-model, whose frame shows the failure
            Err(AppError::Api(_)) => {}
            Err(e) => writeln!(stdout, "error: {e}")?,
        }
    }
    Ok(())
}
