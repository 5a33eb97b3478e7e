//! Database models for payments.

use crate::types::{PaymentId, TicketId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Database response for a payment row
#[derive(Debug, Clone)]
pub struct PaymentDBResponse {
    pub id: PaymentId,
    pub ticket_id: TicketId,
    pub card_issuer: String,
    pub card_last_digits: String,
    pub value: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database request for creating a new payment.
///
/// `value` is always sourced from the ticket type's price by the caller,
/// never from request input.
#[derive(Debug, Clone)]
pub struct PaymentCreateDBRequest {
    pub ticket_id: TicketId,
    pub card_issuer: String,
    pub card_last_digits: String,
    pub value: Decimal,
}
