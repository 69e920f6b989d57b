//! Router Tests over Gateway Events
//!
//! Feeds JSON invocation events straight into the router and checks the
//! serialized response envelope.

use std::sync::Arc;

use serde_json::{json, Value};
use shoe_api::{store::MemoryStore, ApiEvent, RequestRouter};

fn router() -> RequestRouter {
    RequestRouter::new(Arc::new(MemoryStore::default()))
}

fn event(value: Value) -> ApiEvent {
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn test_gateway_event_round_trip() {
    let router = router();

    let created = router
        .route(&event(json!({
            "httpMethod": "POST",
            "path": "/shoe",
            "queryStringParameters": null,
            "body": "{\"shoeId\":\"s1\",\"name\":\"X\"}"
        })))
        .await;
    assert_eq!(created.status_code, 200);

    let fetched = router
        .route(&event(json!({
            "httpMethod": "GET",
            "path": "/shoe",
            "queryStringParameters": {"shoeId": "s1"}
        })))
        .await;

    let envelope = serde_json::to_value(&fetched).unwrap();
    assert_eq!(envelope["statusCode"], 200);
    assert_eq!(
        envelope["headers"],
        json!({"Content-Type": "application/json"})
    );
    let body: Value = serde_json::from_str(envelope["body"].as_str().unwrap()).unwrap();
    assert_eq!(body, json!({"shoeId": "s1", "name": "X"}));
}

#[tokio::test]
async fn test_unmatched_event_yields_not_found_envelope() {
    let response = router()
        .route(&event(json!({"httpMethod": "OPTIONS", "path": "/shoe"})))
        .await;

    assert_eq!(response.status_code, 404);
    assert_eq!(
        response.headers.get("Content-Type").map(String::as_str),
        Some("application/json")
    );
}

#[tokio::test]
async fn test_update_with_expression_syntax_in_key_is_literal() {
    let router = router();
    router
        .route(&ApiEvent::new("POST", "/shoe").with_body(r#"{"shoeId":"s1","name":"X"}"#))
        .await;

    let response = router
        .route(&ApiEvent::new("PATCH", "/shoe").with_body(
            r#"{"shoeId":"s1","updateKey":"name = :value, price","updateValue":"Y"}"#,
        ))
        .await;
    assert_eq!(response.status_code, 200);

    let fetched = router
        .route(&ApiEvent::new("GET", "/shoe").with_query("shoeId", "s1"))
        .await;
    let record: Value = serde_json::from_str(&fetched.body).unwrap();
    assert_eq!(record["name"], "X");
    assert_eq!(record["name = :value, price"], "Y");
}
