//! Terminal front-end for the drink API.
//!
//! Plays the part of the browser page: a `UreqTransport` performs the HTTP
//! round-trips, `TerminalRenderer` draws the view state after every change,
//! and typed `Command`s read from input become view-model events.

pub mod command;
pub mod config;
pub mod render;
pub mod transport;

pub use command::{dispatch, AppError, Command, Outcome};
pub use config::{Config, ConfigError};
pub use render::TerminalRenderer;
pub use transport::UreqTransport;
