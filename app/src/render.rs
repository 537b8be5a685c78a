//! Plain-text rendering of the view state.

use std::io::Write;

use drink_core::{Drink, Render, Status, ViewState};
use serde_json::Value;
use tracing::warn;

/// Writes one frame per state change to `out`.
pub struct TerminalRenderer<W> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Render for TerminalRenderer<W> {
    fn render(&mut self, view: &ViewState) {
        let frame = frame(view);
        if let Err(e) = self.out.write_all(frame.as_bytes()).and_then(|()| self.out.flush()) {
            warn!(error = %e, "failed to draw frame");
        }
    }
}

/// A frame while a request is out is a single line; otherwise the whole page.
pub fn frame(view: &ViewState) -> String {
    if let Status::InFlight(action) = view.status() {
        return format!("... {action}\n");
    }

    let mut out = String::new();
    match view.drink_list() {
        None => out.push_str("drinks: (not loaded)\n"),
        Some([]) => out.push_str("drinks: (none)\n"),
        Some(drinks) => {
            out.push_str("drinks:\n");
            for drink in drinks {
                out.push_str("  ");
                out.push_str(&drink_line(drink));
                out.push('\n');
            }
        }
    }

    let draft = view.pending_draft();
    if !draft.is_empty() || view.form_dirty() {
        let fields = Value::Object(draft.fields().clone());
        let marker = if view.form_dirty() { " (unsaved)" } else { "" };
        out.push_str(&format!("draft: {fields}{marker}\n"));
    }

    if let Status::Failed { action, message } = view.status() {
        out.push_str(&format!("error: {action} failed: {message}\n"));
    }
    out
}

/// `#id name {other fields}`; the name falls back to `(unnamed)`.
pub fn drink_line(drink: &Drink) -> String {
    let mut rest = drink.fields().clone();
    rest.remove("name");
    let name = drink.name().unwrap_or("(unnamed)");
    if rest.is_empty() {
        format!("#{} {name}", drink.id)
    } else {
        format!("#{} {name} {}", drink.id, Value::Object(rest))
    }
}
