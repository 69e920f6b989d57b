//! API Routes
//!
//! Configures the Axum router. Every request goes through the fallback so
//! that the routing table in [`super::router`] stays the single dispatcher.

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{event_handler, AppState};

/// Creates the HTTP router.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .fallback(event_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
