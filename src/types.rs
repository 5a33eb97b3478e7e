//! Common type definitions.
//!
//! Entity identifiers are serial integers from the backing store, wrapped in
//! type aliases so signatures say which entity they refer to:
//!
//! - [`UserId`]: user account identifier
//! - [`EnrollmentId`]: enrollment identifier (at most one per user)
//! - [`TicketId`] / [`TicketTypeId`]: ticket and ticket-type identifiers
//! - [`HotelId`] / [`RoomId`]: lodging identifiers
//! - [`PaymentId`]: payment record identifier

// Type aliases for IDs
pub type UserId = i32;
pub type EnrollmentId = i32;
pub type TicketId = i32;
pub type TicketTypeId = i32;
pub type HotelId = i32;
pub type RoomId = i32;
pub type PaymentId = i32;
