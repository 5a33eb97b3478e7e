//! Authentication seam.
//!
//! Session issuance (login, registration) happens outside this service. The
//! only concern here is resolving `Authorization: Bearer <token>` against the
//! `sessions` table to identify the caller; see [`current_user`].

pub mod current_user;
