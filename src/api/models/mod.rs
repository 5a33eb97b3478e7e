//! API request/response models.
//!
//! Wire DTOs are camelCase (matching the public API contract) and convert
//! from the snake_case DB models in [`crate::db::models`] via `From` impls.

pub mod hotels;
pub mod payments;
pub mod tickets;
pub mod users;
