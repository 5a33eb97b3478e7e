//! Repository implementations for database access.
//!
//! This module provides repository structs for each major entity in the system.
//!
//! # Design Pattern
//!
//! Each repository:
//! - Wraps a SQLx connection or transaction
//! - Provides strongly-typed query and mutation methods
//! - Handles query construction and parameter binding
//! - Returns domain models from [`crate::db::models`]
//!
//! # Available Repositories
//!
//! - [`Enrollments`]: enrollment lookup by user
//! - [`Tickets`]: tickets and ticket-type reference data
//! - [`Hotels`]: hotel and room lookup
//! - [`Payments`]: payment records
//!
//! # Common Pattern
//!
//! ```ignore
//! use eventdesk::db::handlers::Tickets;
//!
//! async fn example(pool: &sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut conn = pool.acquire().await?;
//!     let mut repo = Tickets::new(&mut conn);
//!     let types = repo.list_types().await?;
//!     Ok(())
//! }
//! ```

pub mod enrollments;
pub mod hotels;
pub mod payments;
pub mod tickets;

pub use enrollments::Enrollments;
pub use hotels::Hotels;
pub use payments::Payments;
pub use tickets::Tickets;
