use crate::db::{
    errors::Result,
    models::tickets::{TicketCreateDBRequest, TicketDBResponse, TicketStatus, TicketTypeDBResponse},
};
use crate::types::{EnrollmentId, TicketId, TicketTypeId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgConnection};

// Joined ticket + ticket-type row as it comes back from the store
#[derive(Debug, Clone, FromRow)]
struct TicketRow {
    pub id: TicketId,
    pub enrollment_id: EnrollmentId,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub type_id: TicketTypeId,
    pub type_name: String,
    pub type_price: Decimal,
    pub type_is_remote: bool,
    pub type_includes_hotel: bool,
    pub type_created_at: DateTime<Utc>,
    pub type_updated_at: DateTime<Utc>,
}

impl From<TicketRow> for TicketDBResponse {
    fn from(row: TicketRow) -> Self {
        Self {
            id: row.id,
            enrollment_id: row.enrollment_id,
            status: row.status,
            ticket_type: TicketTypeDBResponse {
                id: row.type_id,
                name: row.type_name,
                price: row.type_price,
                is_remote: row.type_is_remote,
                includes_hotel: row.type_includes_hotel,
                created_at: row.type_created_at,
                updated_at: row.type_updated_at,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct Tickets<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Tickets<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// List all ticket-type reference rows
    pub async fn list_types(&mut self) -> Result<Vec<TicketTypeDBResponse>> {
        let types = sqlx::query_as!(
            TicketTypeDBResponse,
            r#"
            SELECT id, name, price, is_remote, includes_hotel, created_at, updated_at
            FROM ticket_types
            ORDER BY id
            "#
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(types)
    }

    /// Fetch a single ticket by ID with its type embedded
    pub async fn find_by_id(&mut self, ticket_id: TicketId) -> Result<Option<TicketDBResponse>> {
        let row = sqlx::query_as!(
            TicketRow,
            r#"
            SELECT t.id, t.enrollment_id, t.status as "status: TicketStatus",
                   t.created_at, t.updated_at,
                   tt.id as type_id, tt.name as type_name, tt.price as type_price,
                   tt.is_remote as type_is_remote, tt.includes_hotel as type_includes_hotel,
                   tt.created_at as type_created_at, tt.updated_at as type_updated_at
            FROM tickets t
            INNER JOIN ticket_types tt ON t.ticket_type_id = tt.id
            WHERE t.id = $1
            "#,
            ticket_id
        )
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(row.map(TicketDBResponse::from))
    }

    /// List the tickets belonging to an enrollment, oldest first.
    ///
    /// More than one row is possible; callers that assume a single ticket per
    /// enrollment take the first.
    pub async fn find_by_enrollment_id(&mut self, enrollment_id: EnrollmentId) -> Result<Vec<TicketDBResponse>> {
        let rows = sqlx::query_as!(
            TicketRow,
            r#"
            SELECT t.id, t.enrollment_id, t.status as "status: TicketStatus",
                   t.created_at, t.updated_at,
                   tt.id as type_id, tt.name as type_name, tt.price as type_price,
                   tt.is_remote as type_is_remote, tt.includes_hotel as type_includes_hotel,
                   tt.created_at as type_created_at, tt.updated_at as type_updated_at
            FROM tickets t
            INNER JOIN ticket_types tt ON t.ticket_type_id = tt.id
            WHERE t.enrollment_id = $1
            ORDER BY t.created_at, t.id
            "#,
            enrollment_id
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(rows.into_iter().map(TicketDBResponse::from).collect())
    }

    /// Create a new ticket in RESERVED state and return it with its type embedded
    pub async fn create(&mut self, request: &TicketCreateDBRequest) -> Result<TicketDBResponse> {
        let row = sqlx::query_as!(
            TicketRow,
            r#"
            WITH inserted AS (
                INSERT INTO tickets (enrollment_id, ticket_type_id, status)
                VALUES ($1, $2, 'RESERVED')
                RETURNING id, enrollment_id, ticket_type_id, status, created_at, updated_at
            )
            SELECT i.id, i.enrollment_id, i.status as "status: TicketStatus",
                   i.created_at, i.updated_at,
                   tt.id as type_id, tt.name as type_name, tt.price as type_price,
                   tt.is_remote as type_is_remote, tt.includes_hotel as type_includes_hotel,
                   tt.created_at as type_created_at, tt.updated_at as type_updated_at
            FROM inserted i
            INNER JOIN ticket_types tt ON i.ticket_type_id = tt.id
            "#,
            request.enrollment_id,
            request.ticket_type_id
        )
        .fetch_one(&mut *self.db)
        .await?;

        Ok(TicketDBResponse::from(row))
    }

    /// Flip a RESERVED ticket to PAID.
    ///
    /// The update is conditional on the current status, so a concurrent or
    /// repeated payment attempt matches no row and returns `false` instead of
    /// double-paying.
    pub async fn mark_paid(&mut self, ticket_id: TicketId) -> Result<bool> {
        let result = sqlx::query!(
            r#"
            UPDATE tickets
            SET status = 'PAID', updated_at = NOW()
            WHERE id = $1 AND status = 'RESERVED'
            "#,
            ticket_id
        )
        .execute(&mut *self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
