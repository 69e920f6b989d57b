//! Request DTOs for the shoe API
//!
//! Defines the invocation event and the typed request each route is parsed into.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::store::{shoe_id_of, Item};

// == Invocation Event ==
/// HTTP-like invocation event consumed by the router.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEvent {
    pub http_method: String,
    pub path: String,
    #[serde(default, alias = "queryStringParameter")]
    pub query_string_parameters: Option<HashMap<String, String>>,
    /// JSON-encoded request body
    #[serde(default)]
    pub body: Option<String>,
}

impl ApiEvent {
    /// Creates an event with no query parameters and no body.
    pub fn new(http_method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            http_method: http_method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Adds a query parameter.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Sets the body text.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Looks up a query parameter.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
    }

    /// Parses the body as JSON into `T`.
    ///
    /// A missing or blank body and malformed JSON are both invalid requests.
    pub fn json_body<T: DeserializeOwned>(&self) -> Result<T> {
        let body = self
            .body
            .as_deref()
            .filter(|body| !body.trim().is_empty())
            .ok_or_else(|| ApiError::InvalidRequest("Request body is required".to_string()))?;

        serde_json::from_str(body)
            .map_err(|e| ApiError::InvalidRequest(format!("Malformed request body: {}", e)))
    }
}

// == Typed Requests ==
/// A routed request, one variant per entry of the routing table.
#[derive(Debug, Clone, PartialEq)]
pub enum ShoeRequest {
    Health,
    GetShoe { shoe_id: String },
    GetShoes,
    CreateShoe(Item),
    UpdateShoe(UpdateShoeRequest),
    DeleteShoe(DeleteShoeRequest),
}

/// Request body for PATCH /shoe
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShoeRequest {
    pub shoe_id: String,
    /// Dot-separated attribute path, e.g. `stock.size42`
    pub update_key: String,
    pub update_value: Value,
}

impl UpdateShoeRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.shoe_id.is_empty() {
            return Some("shoeId cannot be empty".to_string());
        }
        if self.update_key.is_empty() {
            return Some("updateKey cannot be empty".to_string());
        }
        None
    }
}

/// Request body for DELETE /shoe
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteShoeRequest {
    pub shoe_id: String,
}

impl DeleteShoeRequest {
    /// Validates the request data
    pub fn validate(&self) -> Option<String> {
        if self.shoe_id.is_empty() {
            return Some("shoeId cannot be empty".to_string());
        }
        None
    }
}

/// Checks that a record submitted for creation carries its key.
pub fn validate_record(record: &Item) -> Option<String> {
    match shoe_id_of(record) {
        Some(id) if !id.is_empty() => None,
        Some(_) => Some("shoeId cannot be empty".to_string()),
        None => Some("Record must contain a string shoeId".to_string()),
    }
}
