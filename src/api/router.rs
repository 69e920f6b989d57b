//! Request Router
//!
//! Dispatch table mapping an invocation event to exactly one operation
//! handler, and conversion of every handler failure into a response.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::error::{ApiError, Result};
use crate::models::requests::validate_record;
use crate::models::{
    ApiEvent, ApiResponse, DeleteShoeRequest, ShoeRequest, UpdateShoeRequest,
};
use crate::store::{Item, ShoeStore};

use super::handlers;

pub const HEALTH_PATH: &str = "/health";
pub const SHOE_PATH: &str = "/shoe";
pub const SHOES_PATH: &str = "/shoes";

/// Query parameter naming the record to fetch
pub const SHOE_ID_PARAM: &str = "shoeId";

// == Parse Request ==
/// Matches method and path against the routing table, first match wins, and
/// parses the route's input into its typed request.
pub fn parse_request(event: &ApiEvent) -> Result<ShoeRequest> {
    match (event.http_method.as_str(), event.path.as_str()) {
        ("GET", HEALTH_PATH) => Ok(ShoeRequest::Health),
        ("GET", SHOE_PATH) => {
            let shoe_id = event
                .query_param(SHOE_ID_PARAM)
                .filter(|id| !id.is_empty())
                .ok_or_else(|| {
                    ApiError::InvalidRequest(format!(
                        "Query parameter '{}' is required",
                        SHOE_ID_PARAM
                    ))
                })?;
            Ok(ShoeRequest::GetShoe {
                shoe_id: shoe_id.to_string(),
            })
        }
        ("GET", SHOES_PATH) => Ok(ShoeRequest::GetShoes),
        ("POST", SHOE_PATH) => {
            let record: Item = event.json_body()?;
            if let Some(error_msg) = validate_record(&record) {
                return Err(ApiError::InvalidRequest(error_msg));
            }
            Ok(ShoeRequest::CreateShoe(record))
        }
        ("PATCH", SHOE_PATH) => {
            let req: UpdateShoeRequest = event.json_body()?;
            if let Some(error_msg) = req.validate() {
                return Err(ApiError::InvalidRequest(error_msg));
            }
            Ok(ShoeRequest::UpdateShoe(req))
        }
        ("DELETE", SHOE_PATH) => {
            let req: DeleteShoeRequest = event.json_body()?;
            if let Some(error_msg) = req.validate() {
                return Err(ApiError::InvalidRequest(error_msg));
            }
            Ok(ShoeRequest::DeleteShoe(req))
        }
        (method, path) => Err(ApiError::RouteNotFound {
            method: method.to_string(),
            path: path.to_string(),
        }),
    }
}

// == Request Router ==
/// Routes invocation events to the operation handlers.
#[derive(Clone)]
pub struct RequestRouter {
    store: Arc<dyn ShoeStore>,
}

impl RequestRouter {
    /// Creates a router issuing its store calls against `store`.
    pub fn new(store: Arc<dyn ShoeStore>) -> Self {
        Self { store }
    }

    /// Handles one event. Always produces a response.
    pub async fn route(&self, event: &ApiEvent) -> ApiResponse {
        info!("Request event: {} {}", event.http_method, event.path);

        let result = match parse_request(event) {
            Ok(request) => self.dispatch(request).await,
            Err(e) => Err(e),
        };

        result.unwrap_or_else(|e| {
            if e.is_client_error() {
                warn!("Request {} {} rejected: {}", event.http_method, event.path, e);
            } else {
                error!("Request {} {} failed: {}", event.http_method, event.path, e);
            }
            e.into_response()
        })
    }

    /// Runs the handler for an already parsed request.
    pub async fn dispatch(&self, request: ShoeRequest) -> Result<ApiResponse> {
        let store = self.store.as_ref();
        match request {
            ShoeRequest::Health => handlers::health().await,
            ShoeRequest::GetShoe { shoe_id } => handlers::get_shoe(store, &shoe_id).await,
            ShoeRequest::GetShoes => handlers::get_shoes(store).await,
            ShoeRequest::CreateShoe(record) => handlers::create_shoe(store, record).await,
            ShoeRequest::UpdateShoe(req) => handlers::update_shoe(store, req).await,
            ShoeRequest::DeleteShoe(req) => handlers::delete_shoe(store, req).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StoreError, StoreResult};
    use crate::store::{AttributePath, MemoryStore, ScanPage};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    /// Store whose every call fails as an unreachable backend would.
    struct FailingStore;

    fn unavailable(operation: &'static str) -> StoreError {
        StoreError::Backend {
            operation,
            message: "connection refused".to_string(),
        }
    }

    #[async_trait]
    impl ShoeStore for FailingStore {
        async fn get(&self, _shoe_id: &str) -> StoreResult<Option<Item>> {
            Err(unavailable("GetItem"))
        }

        async fn put(&self, _item: Item) -> StoreResult<()> {
            Err(unavailable("PutItem"))
        }

        async fn update(
            &self,
            _shoe_id: &str,
            _path: &AttributePath,
            _value: Value,
        ) -> StoreResult<Option<Item>> {
            Err(unavailable("UpdateItem"))
        }

        async fn delete(&self, _shoe_id: &str) -> StoreResult<Option<Item>> {
            Err(unavailable("DeleteItem"))
        }

        async fn scan(&self, _exclusive_start_key: Option<Item>) -> StoreResult<ScanPage> {
            Err(unavailable("Scan"))
        }
    }

    fn memory_router() -> RequestRouter {
        RequestRouter::new(Arc::new(MemoryStore::default()))
    }

    fn body_json(response: &ApiResponse) -> Value {
        serde_json::from_str(&response.body).unwrap()
    }

    #[test]
    fn test_parse_health() {
        let event = ApiEvent::new("GET", "/health");
        assert_eq!(parse_request(&event).unwrap(), ShoeRequest::Health);
    }

    #[test]
    fn test_parse_get_shoe() {
        let event = ApiEvent::new("GET", "/shoe").with_query("shoeId", "s1");
        assert_eq!(
            parse_request(&event).unwrap(),
            ShoeRequest::GetShoe {
                shoe_id: "s1".to_string()
            }
        );
    }

    #[test]
    fn test_parse_get_shoe_without_id() {
        let event = ApiEvent::new("GET", "/shoe");
        assert!(matches!(
            parse_request(&event),
            Err(ApiError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_parse_get_shoes() {
        let event = ApiEvent::new("GET", "/shoes");
        assert_eq!(parse_request(&event).unwrap(), ShoeRequest::GetShoes);
    }

    #[test]
    fn test_parse_create() {
        let event = ApiEvent::new("POST", "/shoe").with_body(r#"{"shoeId":"s1","name":"X"}"#);
        match parse_request(&event).unwrap() {
            ShoeRequest::CreateShoe(record) => assert_eq!(record["name"], "X"),
            other => panic!("expected create, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_create_requires_shoe_id() {
        let event = ApiEvent::new("POST", "/shoe").with_body(r#"{"name":"X"}"#);
        assert!(matches!(
            parse_request(&event),
            Err(ApiError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_parse_update() {
        let event = ApiEvent::new("PATCH", "/shoe")
            .with_body(r#"{"shoeId":"s1","updateKey":"name","updateValue":"Y"}"#);
        assert_eq!(
            parse_request(&event).unwrap(),
            ShoeRequest::UpdateShoe(UpdateShoeRequest {
                shoe_id: "s1".to_string(),
                update_key: "name".to_string(),
                update_value: json!("Y"),
            })
        );
    }

    #[test]
    fn test_parse_delete() {
        let event = ApiEvent::new("DELETE", "/shoe").with_body(r#"{"shoeId":"s1"}"#);
        assert_eq!(
            parse_request(&event).unwrap(),
            ShoeRequest::DeleteShoe(DeleteShoeRequest {
                shoe_id: "s1".to_string()
            })
        );
    }

    #[test]
    fn test_parse_unmatched_routes() {
        for (method, path) in [
            ("PUT", "/shoe"),
            ("POST", "/shoes"),
            ("GET", "/shoe/"),
            ("get", "/health"),
            ("DELETE", "/health"),
            ("GET", "/"),
        ] {
            let event = ApiEvent::new(method, path);
            assert!(
                matches!(parse_request(&event), Err(ApiError::RouteNotFound { .. })),
                "{} {} should not match",
                method,
                path
            );
        }
    }

    #[tokio::test]
    async fn test_route_health_has_empty_body() {
        let response = memory_router().route(&ApiEvent::new("GET", "/health")).await;
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "");
    }

    #[tokio::test]
    async fn test_route_unmatched_is_404() {
        let response = memory_router().route(&ApiEvent::new("PUT", "/shoe")).await;
        assert_eq!(response.status_code, 404);
        assert!(body_json(&response)["error"].as_str().unwrap().contains("PUT /shoe"));
    }

    #[tokio::test]
    async fn test_route_malformed_body_is_400() {
        let event = ApiEvent::new("POST", "/shoe").with_body("{\"shoeId\":");
        let response = memory_router().route(&event).await;
        assert_eq!(response.status_code, 400);
    }

    #[tokio::test]
    async fn test_route_invalid_update_path_is_400() {
        let event = ApiEvent::new("PATCH", "/shoe")
            .with_body(r#"{"shoeId":"s1","updateKey":"stock..eu","updateValue":1}"#);
        let response = memory_router().route(&event).await;
        assert_eq!(response.status_code, 400);
    }

    #[tokio::test]
    async fn test_route_store_failure_is_500() {
        let router = RequestRouter::new(Arc::new(FailingStore));
        let events = [
            ApiEvent::new("GET", "/shoe").with_query("shoeId", "s1"),
            ApiEvent::new("GET", "/shoes"),
            ApiEvent::new("POST", "/shoe").with_body(r#"{"shoeId":"s1"}"#),
            ApiEvent::new("PATCH", "/shoe")
                .with_body(r#"{"shoeId":"s1","updateKey":"name","updateValue":"Y"}"#),
            ApiEvent::new("DELETE", "/shoe").with_body(r#"{"shoeId":"s1"}"#),
        ];

        for event in events {
            let response = router.route(&event).await;
            assert_eq!(response.status_code, 500, "{} {}", event.http_method, event.path);
            assert!(body_json(&response)["error"].is_string());
        }
    }

    #[tokio::test]
    async fn test_health_does_not_touch_store() {
        let router = RequestRouter::new(Arc::new(FailingStore));
        let response = router.route(&ApiEvent::new("GET", "/health")).await;
        assert_eq!(response.status_code, 200);
    }
}
