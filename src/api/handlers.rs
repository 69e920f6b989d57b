//! API Handlers
//!
//! One handler per operation: each issues a single store call (or a full
//! scan) and shapes the result through the response builder. Also holds the
//! axum handler feeding HTTP requests into the router.

use std::collections::HashMap;
use std::sync::Arc;

use aws_sdk_dynamodb::config::Region;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{Method, Uri},
};
use serde_json::to_value;
use tracing::{info, warn};

use crate::config::{Config, StoreConfig};
use crate::error::{ApiError, Result};
use crate::models::{
    ApiEvent, ApiResponse, DeleteShoeRequest, MutationResponse, Operation, ShoesResponse,
    UpdateShoeRequest,
};
use crate::store::{scan_all, AttributePath, DynamoStore, Item, MemoryStore, ShoeStore};

use super::router::RequestRouter;

/// Application state shared across all requests.
///
/// Holds the router and, through it, the store client created at startup.
#[derive(Clone)]
pub struct AppState {
    pub router: RequestRouter,
}

impl AppState {
    /// Creates a new AppState over the given store.
    pub fn new(store: Arc<dyn ShoeStore>) -> Self {
        Self {
            router: RequestRouter::new(store),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the configured store backend; the DynamoDB client resolves
    /// credentials through the default AWS provider chain.
    pub async fn from_config(config: &Config) -> Self {
        let store: Arc<dyn ShoeStore> = match &config.store {
            StoreConfig::Memory => {
                info!("Using in-memory store (scan page size {})", config.scan_page_size);
                Arc::new(MemoryStore::new(config.scan_page_size))
            }
            StoreConfig::DynamoDb {
                region,
                table_name,
                endpoint_url,
            } => {
                let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
                    .region(Region::new(region.clone()));
                if let Some(url) = endpoint_url {
                    loader = loader.endpoint_url(url.clone());
                }
                let sdk_config = loader.load().await;
                let store = DynamoStore::new(
                    aws_sdk_dynamodb::Client::new(&sdk_config),
                    table_name.clone(),
                );
                info!("Using DynamoDB table '{}' in {}", store.table_name(), region);
                Arc::new(store)
            }
        };
        Self::new(store)
    }
}

/// Fallback for every HTTP request.
///
/// Builds the invocation event from method, path, query and body and hands
/// it to the router. A body that is not UTF-8 text is answered with a 400
/// envelope without reaching the router.
pub async fn event_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> ApiResponse {
    let body = match String::from_utf8(body.to_vec()) {
        Ok(body) => body,
        Err(e) => {
            let err = ApiError::InvalidRequest(format!("Request body is not valid UTF-8: {}", e));
            warn!("Request {} {} rejected: {}", method, uri.path(), err);
            return err.into_response();
        }
    };

    let event = ApiEvent {
        http_method: method.as_str().to_string(),
        path: uri.path().to_string(),
        query_string_parameters: (!query.is_empty()).then_some(query),
        body: (!body.is_empty()).then_some(body),
    };

    state.router.route(&event).await
}

/// GET /health
pub async fn health() -> Result<ApiResponse> {
    Ok(ApiResponse::ok(None))
}

/// GET /shoe?shoeId=...
///
/// A missing record is answered with 200 and an empty body.
pub async fn get_shoe(store: &dyn ShoeStore, shoe_id: &str) -> Result<ApiResponse> {
    let item = store.get(shoe_id).await?;
    Ok(ApiResponse::ok(item.map(serde_json::Value::Object)))
}

/// GET /shoes
pub async fn get_shoes(store: &dyn ShoeStore) -> Result<ApiResponse> {
    let shoes = scan_all(store).await?;
    info!("Fetched {} shoes", shoes.len());
    Ok(ApiResponse::ok(Some(to_value(ShoesResponse { shoes })?)))
}

/// POST /shoe
///
/// Overwrites any record with the same id.
pub async fn create_shoe(store: &dyn ShoeStore, record: Item) -> Result<ApiResponse> {
    store.put(record.clone()).await?;
    let body = MutationResponse::success(Operation::Save, Some(record));
    Ok(ApiResponse::ok(Some(to_value(body)?)))
}

/// PATCH /shoe
pub async fn update_shoe(store: &dyn ShoeStore, req: UpdateShoeRequest) -> Result<ApiResponse> {
    let path = AttributePath::parse(&req.update_key)?;
    let changed = store.update(&req.shoe_id, &path, req.update_value).await?;
    let body = MutationResponse::success(Operation::Update, changed);
    Ok(ApiResponse::ok(Some(to_value(body)?)))
}

/// DELETE /shoe
pub async fn delete_shoe(store: &dyn ShoeStore, req: DeleteShoeRequest) -> Result<ApiResponse> {
    let deleted = store.delete(&req.shoe_id).await?;
    let body = MutationResponse::success(Operation::Delete, deleted);
    Ok(ApiResponse::ok(Some(to_value(body)?)))
}
