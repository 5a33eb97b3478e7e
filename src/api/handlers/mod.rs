//! HTTP handlers.
//!
//! Handlers authenticate via the [`CurrentUser`](crate::api::models::users::CurrentUser)
//! extractor, acquire a connection from the pool, delegate to the repository
//! layer and convert DB models into wire DTOs. All failures propagate as
//! [`Error`](crate::errors::Error) and are mapped to status codes centrally.

pub mod hotels;
pub mod payments;
pub mod tickets;
