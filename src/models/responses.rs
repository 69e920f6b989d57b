//! Response DTOs for the shoe API
//!
//! Defines the invocation response envelope and the bodies carried inside it.

use std::collections::BTreeMap;

use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::Item;

/// Content type of every response body.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Message attached to every successful mutation.
pub const SUCCESS_MESSAGE: &str = "SUCCESS";

// == Api Response ==
/// Invocation response: status code, headers and a JSON-encoded body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    /// JSON text, or empty when the response carries no body
    pub body: String,
}

impl ApiResponse {
    /// Builds a response with a JSON content type.
    ///
    /// An absent body serializes to nothing, so the body text is empty.
    pub fn build(status_code: u16, body: Option<Value>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string());

        Self {
            status_code,
            headers,
            body: body.map(|value| value.to_string()).unwrap_or_default(),
        }
    }

    /// Builds a 200 response.
    pub fn ok(body: Option<Value>) -> Self {
        Self::build(200, body)
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = (status, self.body).into_response();
        let headers = response.headers_mut();
        for (name, value) in &self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                headers.insert(name, value);
            }
        }
        response
    }
}

// == Mutation Envelope ==
/// Kind of mutation reported in the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    Save,
    Update,
    Delete,
}

/// Body of POST, PATCH and DELETE responses.
///
/// `Item` is the attribute map itself, never the store's response wrapper:
/// an update reports `{"name": "Y"}` rather than `{"Attributes": {"name": "Y"}}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MutationResponse {
    pub operation: Operation,
    pub message: String,
    /// Submitted record, changed attributes, or deleted record
    pub item: Option<Item>,
}

impl MutationResponse {
    /// Creates a successful envelope for the given operation.
    pub fn success(operation: Operation, item: Option<Item>) -> Self {
        Self {
            operation,
            message: SUCCESS_MESSAGE.to_string(),
            item,
        }
    }
}

/// Body of GET /shoes.
#[derive(Debug, Clone, Serialize)]
pub struct ShoesResponse {
    pub shoes: Vec<Item>,
}
