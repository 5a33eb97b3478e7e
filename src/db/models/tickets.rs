//! Database models for tickets and ticket types.

use crate::types::{EnrollmentId, TicketId, TicketTypeId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Ticket lifecycle status stored as TEXT in database.
///
/// Tickets are created `Reserved` and flip to `Paid` exactly once, through
/// the payment flow's conditional update.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Reserved,
    Paid,
}

/// Database response for a ticket-type reference row
#[derive(Debug, Clone)]
pub struct TicketTypeDBResponse {
    pub id: TicketTypeId,
    pub name: String,
    pub price: Decimal,
    pub is_remote: bool,
    pub includes_hotel: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database response for a ticket row with its type embedded
#[derive(Debug, Clone)]
pub struct TicketDBResponse {
    pub id: TicketId,
    pub enrollment_id: EnrollmentId,
    pub status: TicketStatus,
    pub ticket_type: TicketTypeDBResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database request for creating a new ticket
#[derive(Debug, Clone)]
pub struct TicketCreateDBRequest {
    pub enrollment_id: EnrollmentId,
    pub ticket_type_id: TicketTypeId,
}
