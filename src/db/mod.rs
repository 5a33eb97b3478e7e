//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx with PostgreSQL.
//! It follows the Repository pattern to provide clean abstractions over database operations.
//!
//! # Modules
//!
//! - [`handlers`]: Repository implementations for queries and mutations
//! - [`models`]: Database record structures matching table schemas
//! - [`errors`]: Database-specific error types
//!
//! # Repository Pattern
//!
//! The [`handlers`] module provides a repository struct per entity family.
//! Repositories encapsulate all database access for that entity and return
//! the record structs from [`models`].
//!
//! ## Example Usage
//!
//! ```ignore
//! use eventdesk::db::handlers::Enrollments;
//!
//! async fn example(pool: &sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut conn = pool.acquire().await?;
//!     let mut repo = Enrollments::new(&mut conn);
//!
//!     if let Some(enrollment) = repo.find_by_user_id(42).await? {
//!         println!("Enrollment {}", enrollment.id);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Transactions
//!
//! Read-only flows acquire a plain pool connection. Multi-write flows (the
//! payment path) create the repository from a transaction so the status flip
//! and the payment insert commit or roll back together.
//!
//! # Migrations
//!
//! Database migrations are managed by SQLx and located in the `migrations/`
//! directory. The [`crate::migrator`] function provides access to the migrator.

pub mod errors;
pub mod handlers;
pub mod models;
