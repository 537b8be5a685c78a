//! In-memory stand-in for the drink REST API.
//!
//! Drinks are stored as opaque JSON objects keyed by a sequential integer id
//! assigned on create. Any `id` a client sends in a body is ignored.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Drink {
    pub id: u64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: u64,
    drinks: BTreeMap<u64, Map<String, Value>>,
}

impl Store {
    fn insert(&mut self, fields: Map<String, Value>) -> Drink {
        self.next_id += 1;
        let id = self.next_id;
        self.drinks.insert(id, fields.clone());
        Drink { id, fields }
    }

    fn get(&self, id: u64) -> Option<Drink> {
        self.drinks.get(&id).map(|fields| Drink {
            id,
            fields: fields.clone(),
        })
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::default();
    Router::new()
        .route("/api/drink", get(list_drinks).post(create_drink))
        .route(
            "/api/drink/{id}",
            get(get_drink).put(update_drink).delete(delete_drink),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn without_id(mut fields: Map<String, Value>) -> Map<String, Value> {
    if fields.remove("id").is_some() {
        debug!("ignoring client-supplied id");
    }
    fields
}

async fn list_drinks(State(db): State<Db>) -> Json<Vec<Drink>> {
    let store = db.read().await;
    let drinks: Vec<Drink> = store
        .drinks
        .iter()
        .map(|(id, fields)| Drink {
            id: *id,
            fields: fields.clone(),
        })
        .collect();
    debug!(count = drinks.len(), "listing drinks");
    Json(drinks)
}

async fn create_drink(
    State(db): State<Db>,
    Json(input): Json<Map<String, Value>>,
) -> (StatusCode, Json<Drink>) {
    let drink = db.write().await.insert(without_id(input));
    info!(id = drink.id, "created drink");
    (StatusCode::CREATED, Json(drink))
}

async fn get_drink(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Drink>, StatusCode> {
    let store = db.read().await;
    store.get(id).map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_drink(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<Map<String, Value>>,
) -> Result<Json<Drink>, StatusCode> {
    let mut store = db.write().await;
    let fields = store.drinks.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    *fields = without_id(input);
    info!(id, "updated drink");
    Ok(Json(Drink {
        id,
        fields: fields.clone(),
    }))
}

async fn delete_drink(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .drinks
        .remove(&id)
        .map(|_| {
            info!(id, "deleted drink");
            StatusCode::NO_CONTENT
        })
        .ok_or(StatusCode::NOT_FOUND)
}
