//! Domain DTOs for the drink API.
//!
//! # Design
//! A drink is opaque beyond its identifier: every other field is carried as
//! raw JSON so the client never constrains what the server stores. These
//! types mirror the mock-server's schema but are defined independently.
//!
//! `DrinkDraft` and `Drink` are separate types so that a create call can
//! never carry an identifier and an update or delete can never lack one.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

const ID_KEY: &str = "id";

/// Server-assigned drink identifier.
///
/// Servers in the wild hand out integers or strings; both are kept verbatim
/// and echoed back in URL paths. Anything else (negative or fractional
/// numbers, objects) is carried as raw JSON so one odd record cannot fail a
/// whole listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DrinkId {
    Int(u64),
    Text(String),
    Other(Value),
}

impl DrinkId {
    /// Whether two ids name the same record once written into a path.
    ///
    /// `Int(1)` and `Text("1")` match; `Int(7)` and `Text("007")` do not.
    pub fn same_as(&self, other: &DrinkId) -> bool {
        self == other || self.to_string() == other.to_string()
    }
}

impl fmt::Display for DrinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrinkId::Int(n) => write!(f, "{n}"),
            DrinkId::Text(s) => f.write_str(s),
            DrinkId::Other(v) => write!(f, "{v}"),
        }
    }
}

impl FromStr for DrinkId {
    type Err = Infallible;

    /// Typed ids stay exactly as written; `007` is not `7`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DrinkId::Text(s.to_string()))
    }
}

impl From<u64> for DrinkId {
    fn from(n: u64) -> Self {
        DrinkId::Int(n)
    }
}

impl From<&str> for DrinkId {
    fn from(s: &str) -> Self {
        DrinkId::Text(s.to_string())
    }
}

/// A drink that has not been persisted yet. Never holds an `id` field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct DrinkDraft {
    fields: Map<String, Value>,
}

impl DrinkDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field on the draft. Returns `false` (and stores nothing) for `id`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        let key = key.into();
        if key == ID_KEY {
            warn!("ignoring id on drink draft");
            return false;
        }
        self.fields.insert(key, value.into());
        true
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for DrinkDraft {
    fn from(mut fields: Map<String, Value>) -> Self {
        if fields.remove(ID_KEY).is_some() {
            warn!("dropped id from drink draft");
        }
        Self { fields }
    }
}

impl From<DrinkDraft> for Map<String, Value> {
    fn from(draft: DrinkDraft) -> Self {
        draft.fields
    }
}

/// A persisted drink as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drink {
    pub id: DrinkId,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Drink {
    pub fn new(id: impl Into<DrinkId>, mut fields: Map<String, Value>) -> Self {
        fields.remove(ID_KEY);
        Self {
            id: id.into(),
            fields,
        }
    }

    /// The `name` field, when the server stores one as a string.
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    /// Edit a field. The identifier is fixed; `id` is refused with `false`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        let key = key.into();
        if key == ID_KEY {
            warn!(id = %self.id, "refusing to overwrite drink id");
            return false;
        }
        self.fields.insert(key, value.into());
        true
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}
