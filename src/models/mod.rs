//! Request and Response models for the shoe API
//!
//! This module defines the invocation event, the typed requests it is
//! routed into, and the response envelope handed back to the caller.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{ApiEvent, DeleteShoeRequest, ShoeRequest, UpdateShoeRequest};
pub use responses::{ApiResponse, MutationResponse, Operation, ShoesResponse};
