use crate::db::models::tickets::{TicketDBResponse, TicketStatus, TicketTypeDBResponse};
use crate::types::{EnrollmentId, TicketId, TicketTypeId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Request models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketCreate {
    /// Ticket type to reserve. Required; rejected with 400 when absent.
    pub ticket_type_id: Option<TicketTypeId>,
}

// Response models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketTypeResponse {
    pub id: TicketTypeId,
    pub name: String,
    /// Price in the event's currency
    #[schema(value_type = String)]
    pub price: Decimal,
    pub is_remote: bool,
    pub includes_hotel: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponse {
    pub id: TicketId,
    pub enrollment_id: EnrollmentId,
    pub status: TicketStatus,
    pub ticket_type: TicketTypeResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Conversions
impl From<TicketTypeDBResponse> for TicketTypeResponse {
    fn from(db: TicketTypeDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            price: db.price,
            is_remote: db.is_remote,
            includes_hotel: db.includes_hotel,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<TicketDBResponse> for TicketResponse {
    fn from(db: TicketDBResponse) -> Self {
        Self {
            id: db.id,
            enrollment_id: db.enrollment_id,
            status: db.status,
            ticket_type: TicketTypeResponse::from(db.ticket_type),
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
