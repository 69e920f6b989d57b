//! Shoe API - A single-resource CRUD API for shoe records
//!
//! Routes health, fetch-one, fetch-all, create, update and delete requests
//! to a DynamoDB table (or an in-memory stand-in) and wraps every store
//! response in a uniform JSON envelope.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use api::{AppState, RequestRouter};
pub use config::Config;
pub use models::{ApiEvent, ApiResponse};
