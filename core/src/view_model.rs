//! State holder that bridges user events to the drink API.
//!
//! # Design
//! `DrinkViewModel` owns the rendered drink list, the pending draft and the
//! status of the last action. Every event runs to completion on the caller's
//! turn: the request goes out through the `Transport`, the response comes
//! back, and only then is local state touched. After each mutation the
//! `Render` is called with the new `ViewState`.
//!
//! `add` merges the server's record into the list, or loads the whole list
//! when none has been loaded yet. `remove` and `edit` resync with a full
//! `load`. `show` fetches one record without touching the list. A failed action leaves the list and the draft
//! exactly as they were and records the error in `Status::Failed`.

use std::fmt;

use serde_json::Value;
use tracing::{info, warn};

use crate::client::DrinkClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Drink, DrinkDraft, DrinkId};

/// A user-triggered event that talks to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Load,
    Add,
    Remove,
    Edit,
    Show,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Load => "load",
            Action::Add => "add",
            Action::Remove => "remove",
            Action::Edit => "edit",
            Action::Show => "show",
        };
        f.write_str(name)
    }
}

/// Where the most recent action stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    InFlight(Action),
    Failed { action: Action, message: String },
}

/// Everything a renderer needs to draw the page.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    drink_list: Option<Vec<Drink>>,
    pending_draft: DrinkDraft,
    form_dirty: bool,
    status: Status,
}

impl ViewState {
    /// `None` until the first successful load.
    pub fn drink_list(&self) -> Option<&[Drink]> {
        self.drink_list.as_deref()
    }

    pub fn pending_draft(&self) -> &DrinkDraft {
        &self.pending_draft
    }

    pub fn form_dirty(&self) -> bool {
        self.form_dirty
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Look up a drink in the rendered list by the id as it appears in paths.
    pub fn find(&self, id: &DrinkId) -> Option<&Drink> {
        self.drink_list()?.iter().find(|d| d.id.same_as(id))
    }
}

/// Draws a `ViewState`. Called after every state mutation.
pub trait Render {
    fn render(&mut self, view: &ViewState);
}

impl<F> Render for F
where
    F: FnMut(&ViewState),
{
    fn render(&mut self, view: &ViewState) {
        self(view)
    }
}

pub struct DrinkViewModel<T, R> {
    client: DrinkClient,
    transport: T,
    renderer: R,
    state: ViewState,
}

impl<T: Transport, R: Render> DrinkViewModel<T, R> {
    /// Build a view-model with an empty, not-yet-loaded list. No request is
    /// made until `start` or `load`.
    pub fn new(client: DrinkClient, transport: T, renderer: R) -> Self {
        Self {
            client,
            transport,
            renderer,
            state: ViewState::default(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Initial load, run once when the page comes up.
    pub fn start(&mut self) -> Result<(), ApiError> {
        self.render();
        self.load()
    }

    /// Replace the list wholesale with the server's collection.
    pub fn load(&mut self) -> Result<(), ApiError> {
        self.begin(Action::Load);
        let result = self.client.list(&self.transport);
        self.finish(Action::Load, result, |state, drinks| {
            state.drink_list = Some(drinks);
        })
    }

    /// Create the pending draft and append the server's record to the list.
    ///
    /// With no list loaded yet there is nothing to merge into, so the full
    /// collection is fetched instead.
    pub fn add(&mut self) -> Result<(), ApiError> {
        self.begin(Action::Add);
        let result = self.client.create(&self.transport, &self.state.pending_draft);
        let merged = self.finish(Action::Add, result, |state, drink| {
            info!(id = %drink.id, "drink created");
            state.pending_draft = DrinkDraft::new();
            state.form_dirty = false;
            match &mut state.drink_list {
                Some(list) => {
                    list.push(drink);
                    true
                }
                None => false,
            }
        })?;
        if merged {
            Ok(())
        } else {
            self.load()
        }
    }

    /// Delete a drink, then resync the list.
    pub fn remove(&mut self, id: &DrinkId) -> Result<(), ApiError> {
        self.begin(Action::Remove);
        let result = self.client.destroy(&self.transport, id);
        self.finish(Action::Remove, result, |_, ()| {
            info!(%id, "drink removed");
        })?;
        self.load()
    }

    /// Replace a drink on the server, then resync the list.
    pub fn edit(&mut self, drink: &Drink) -> Result<(), ApiError> {
        self.begin(Action::Edit);
        let result = self.client.update(&self.transport, drink);
        self.finish(Action::Edit, result, |_, _| {
            info!(id = %drink.id, "drink updated");
        })?;
        self.load()
    }

    /// Fetch a single drink. The list is left alone; a failure shows up in
    /// the status like any other action.
    pub fn show(&mut self, id: &DrinkId) -> Result<Drink, ApiError> {
        self.begin(Action::Show);
        let result = self.client.get(&self.transport, id);
        self.finish(Action::Show, result, |_, drink| drink)
    }

    /// Change one field of the pending draft. `id` is never accepted.
    pub fn set_draft_field(&mut self, key: &str, value: Value) -> bool {
        let stored = self.state.pending_draft.set(key, value);
        if stored {
            self.state.form_dirty = true;
            self.render();
        }
        stored
    }

    /// Discard the pending draft and mark the form pristine.
    pub fn reset_draft(&mut self) {
        self.state.pending_draft = DrinkDraft::new();
        self.state.form_dirty = false;
        self.render();
    }

    fn begin(&mut self, action: Action) {
        self.state.status = Status::InFlight(action);
        self.render();
    }

    fn finish<V, U>(
        &mut self,
        action: Action,
        result: Result<V, ApiError>,
        apply: impl FnOnce(&mut ViewState, V) -> U,
    ) -> Result<U, ApiError> {
        match result {
            Ok(value) => {
                let out = apply(&mut self.state, value);
                self.state.status = Status::Idle;
                self.render();
                Ok(out)
            }
            Err(err) => {
                warn!(%action, error = %err, "drink action failed");
                self.state.status = Status::Failed {
                    action,
                    message: err.to_string(),
                };
                self.render();
                Err(err)
            }
        }
    }

    fn render(&mut self) {
        self.renderer.render(&self.state);
    }
}
