//! HTTP API layer.
//!
//! - [`handlers`]: axum request handlers, one module per resource
//! - [`models`]: request/response DTOs exposed on the wire

pub mod handlers;
pub mod models;
