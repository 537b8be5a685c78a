//! Stateless HTTP request builder and response parser for the drink API.
//!
//! # Design
//! `DrinkClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The one-call helpers (`list`, `get`, ...) glue the two halves together
//! through a caller-supplied `Transport`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Drink, DrinkDraft, DrinkId};

const COLLECTION: &str = "/api/drink";

/// Synchronous, stateless client for the drink API.
#[derive(Debug, Clone)]
pub struct DrinkClient {
    base_url: String,
}

impl DrinkClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_path(&self) -> String {
        format!("{}{COLLECTION}", self.base_url)
    }

    fn member_path(&self, id: &DrinkId) -> String {
        format!("{}{COLLECTION}/{id}", self.base_url)
    }

    pub fn build_list(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_path(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get(&self, id: &DrinkId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.member_path(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create(&self, draft: &DrinkDraft) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection_path(),
            headers: json_headers(),
            body: Some(to_json(draft)?),
        })
    }

    pub fn build_update(&self, drink: &Drink) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.member_path(&drink.id),
            headers: json_headers(),
            body: Some(to_json(drink)?),
        })
    }

    pub fn build_destroy(&self, id: &DrinkId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.member_path(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Drink>, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<Drink, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Drink, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    /// Servers may answer an update with the new record or with nothing.
    pub fn parse_update(&self, response: HttpResponse) -> Result<Option<Drink>, ApiError> {
        check_status(&response)?;
        if response.body.trim().is_empty() {
            return Ok(None);
        }
        from_json(&response.body).map(Some)
    }

    pub fn parse_destroy(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)?;
        Ok(())
    }

    pub fn list(&self, transport: &impl Transport) -> Result<Vec<Drink>, ApiError> {
        self.parse_list(send(transport, self.build_list())?)
    }

    pub fn get(&self, transport: &impl Transport, id: &DrinkId) -> Result<Drink, ApiError> {
        self.parse_get(send(transport, self.build_get(id))?)
    }

    pub fn create(&self, transport: &impl Transport, draft: &DrinkDraft) -> Result<Drink, ApiError> {
        self.parse_create(send(transport, self.build_create(draft)?)?)
    }

    pub fn update(&self, transport: &impl Transport, drink: &Drink) -> Result<Option<Drink>, ApiError> {
        self.parse_update(send(transport, self.build_update(drink)?)?)
    }

    pub fn destroy(&self, transport: &impl Transport, id: &DrinkId) -> Result<(), ApiError> {
        self.parse_destroy(send(transport, self.build_destroy(id))?)
    }
}

fn send(transport: &impl Transport, request: HttpRequest) -> Result<HttpResponse, ApiError> {
    debug!(method = %request.method, path = %request.path, "sending request");
    let response = transport.execute(request)?;
    debug!(status = response.status, "received response");
    Ok(response)
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn from_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
