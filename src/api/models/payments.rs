use crate::db::models::payments::PaymentDBResponse;
use crate::types::{PaymentId, TicketId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// Request models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    pub issuer: String,
    /// Full card number as entered; only the last 4 digits are persisted
    pub number: String,
    pub name: String,
    pub expiration_date: String,
    pub cvv: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCreate {
    /// Ticket to pay for. Required; rejected with 400 when absent.
    pub ticket_id: Option<TicketId>,
    /// Card details. Required; rejected with 400 when absent.
    pub card_data: Option<CardData>,
}

/// Query parameters for fetching a payment
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PaymentQuery {
    /// Ticket the payment belongs to. Required; rejected with 400 when absent.
    pub ticket_id: Option<TicketId>,
}

// Response models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: PaymentId,
    pub ticket_id: TicketId,
    pub card_issuer: String,
    pub card_last_digits: String,
    /// Always the ticket type's price at creation time
    #[schema(value_type = String)]
    pub value: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Conversions
impl From<PaymentDBResponse> for PaymentResponse {
    fn from(db: PaymentDBResponse) -> Self {
        Self {
            id: db.id,
            ticket_id: db.ticket_id,
            card_issuer: db.card_issuer,
            card_last_digits: db.card_last_digits,
            value: db.value,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
