use crate::db::{
    errors::Result,
    models::payments::{PaymentCreateDBRequest, PaymentDBResponse},
};
use crate::types::TicketId;
use sqlx::PgConnection;

pub struct Payments<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Payments<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Fetch the payment for a ticket, if one has been made
    pub async fn find_by_ticket_id(&mut self, ticket_id: TicketId) -> Result<Option<PaymentDBResponse>> {
        let payment = sqlx::query_as!(
            PaymentDBResponse,
            r#"
            SELECT id, ticket_id, card_issuer, card_last_digits, value, created_at, updated_at
            FROM payments
            WHERE ticket_id = $1
            "#,
            ticket_id
        )
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(payment)
    }

    /// Insert a payment record.
    ///
    /// `payments.ticket_id` carries a unique constraint; a duplicate insert
    /// surfaces as [`crate::db::errors::DbError::UniqueViolation`].
    pub async fn create(&mut self, request: &PaymentCreateDBRequest) -> Result<PaymentDBResponse> {
        let payment = sqlx::query_as!(
            PaymentDBResponse,
            r#"
            INSERT INTO payments (ticket_id, card_issuer, card_last_digits, value)
            VALUES ($1, $2, $3, $4)
            RETURNING id, ticket_id, card_issuer, card_last_digits, value, created_at, updated_at
            "#,
            request.ticket_id,
            request.card_issuer,
            request.card_last_digits,
            request.value
        )
        .fetch_one(&mut *self.db)
        .await?;

        Ok(payment)
    }
}
