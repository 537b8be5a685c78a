//! Client core and view-model for the drink API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A caller-supplied
//! `Transport` executes the actual HTTP round-trip. `DrinkViewModel` sits on
//! top and keeps a rendered drink list consistent with the server.
//!
//! # Design
//! - `DrinkClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - The view-model owns all mutable state and calls its `Render` after
//!   every mutation. There is no implicit reactivity.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;
pub mod view_model;

pub use client::DrinkClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::Transport;
pub use types::{Drink, DrinkDraft, DrinkId};
pub use view_model::{Action, DrinkViewModel, Render, Status, ViewState};
