//! Database record structures.
//!
//! Each submodule defines the `*DBResponse` structs returned by the
//! repositories in [`crate::db::handlers`], plus the `*CreateDBRequest`
//! structs those repositories accept for inserts.

pub mod enrollments;
pub mod hotels;
pub mod payments;
pub mod tickets;
