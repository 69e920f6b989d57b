//! API Module
//!
//! Request routing, operation handlers and the HTTP front end.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /shoe?shoeId=...` - Fetch one shoe
//! - `GET /shoes` - Fetch every shoe
//! - `POST /shoe` - Create or replace a shoe
//! - `PATCH /shoe` - Set one attribute of a shoe
//! - `DELETE /shoe` - Delete a shoe

pub mod handlers;
pub mod router;
pub mod routes;

pub use handlers::*;
pub use router::{parse_request, RequestRouter};
pub use routes::create_router;
