use crate::{
    AppState,
    api::models::{
        payments::{PaymentCreate, PaymentQuery, PaymentResponse},
        users::CurrentUser,
    },
    db::errors::DbError,
    db::handlers::{Enrollments, Payments, Tickets},
    db::models::{payments::PaymentCreateDBRequest, tickets::TicketDBResponse},
    errors::{Error, Result},
    types::{TicketId, UserId},
};
use axum::{
    Json,
    extract::{Query, State},
};
use sqlx::PgConnection;
use tracing::instrument;

/// Load a ticket and check that it belongs to the calling user.
///
/// Unknown tickets are 404; tickets owned by someone else (or callers with no
/// enrollment at all) are 401.
async fn find_owned_ticket(
    conn: &mut PgConnection,
    user_id: UserId,
    ticket_id: TicketId,
) -> Result<TicketDBResponse> {
    let ticket = Tickets::new(conn)
        .find_by_id(ticket_id)
        .await?
        .ok_or(Error::NotFound {
            resource: "ticket".to_string(),
            id: ticket_id.to_string(),
        })?;

    let enrollment = Enrollments::new(conn).find_by_user_id(user_id).await?;
    match enrollment {
        Some(enrollment) if enrollment.id == ticket.enrollment_id => Ok(ticket),
        _ => Err(Error::Unauthenticated {
            message: Some("Ticket does not belong to this user".to_string()),
        }),
    }
}

/// Keep only the trailing digits that are safe to store.
fn last_four_digits(number: &str) -> String {
    let digits: Vec<char> = number.chars().collect();
    let start = digits.len().saturating_sub(4);
    digits[start..].iter().collect()
}

/// Get the payment for a ticket
#[utoipa::path(
    get,
    path = "/payments",
    params(PaymentQuery),
    responses(
        (status = 200, description = "The ticket's payment, or null if not yet paid", body = Option<PaymentResponse>),
        (status = 400, description = "Missing ticketId"),
        (status = 401, description = "Not authenticated or ticket belongs to another user"),
        (status = 404, description = "Ticket not found")
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn get_payment(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<PaymentQuery>,
) -> Result<Json<Option<PaymentResponse>>> {
    let ticket_id = query.ticket_id.ok_or(Error::BadRequest {
        message: "ticketId is required".to_string(),
    })?;

    let mut conn = state.db.acquire().await.map_err(DbError::from)?;

    let ticket = find_owned_ticket(&mut conn, user.id, ticket_id).await?;

    let payment = Payments::new(&mut conn).find_by_ticket_id(ticket.id).await?;
    Ok(Json(payment.map(PaymentResponse::from)))
}

/// Pay for a ticket
#[utoipa::path(
    post,
    path = "/payments/process",
    request_body = PaymentCreate,
    responses(
        (status = 200, description = "Payment recorded", body = PaymentResponse),
        (status = 400, description = "Missing ticketId or cardData"),
        (status = 401, description = "Not authenticated or ticket belongs to another user"),
        (status = 404, description = "Ticket not found"),
        (status = 409, description = "Ticket already paid for")
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn create_payment(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<PaymentCreate>,
) -> Result<Json<PaymentResponse>> {
    let ticket_id = request.ticket_id.ok_or(Error::BadRequest {
        message: "ticketId is required".to_string(),
    })?;
    let card_data = request.card_data.ok_or(Error::BadRequest {
        message: "cardData is required".to_string(),
    })?;

    let mut tx = state.db.begin().await.map_err(DbError::from)?;

    let ticket = find_owned_ticket(&mut tx, user.id, ticket_id).await?;

    // Flip RESERVED to PAID and record the payment in one transaction. The
    // conditional update loses the race for an already-paid ticket, and the
    // unique index on payments.ticket_id backs it up.
    let marked = Tickets::new(&mut tx).mark_paid(ticket.id).await?;
    if !marked {
        return Err(Error::Conflict {
            message: "Ticket has already been paid for".to_string(),
        });
    }

    let payment = Payments::new(&mut tx)
        .create(&PaymentCreateDBRequest {
            ticket_id: ticket.id,
            card_issuer: card_data.issuer,
            card_last_digits: last_four_digits(&card_data.number),
            value: ticket.ticket_type.price,
        })
        .await?;

    tx.commit().await.map_err(DbError::from)?;

    Ok(Json(PaymentResponse::from(payment)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::tickets::TicketStatus;
    use crate::test_utils::{
        add_auth_headers, create_test_app, create_test_enrollment, create_ticket, create_ticket_type,
        create_user_with_session,
    };
    use serde_json::json;
    use sqlx::PgPool;

    fn card_payload(ticket_id: i32) -> serde_json::Value {
        json!({
            "ticketId": ticket_id,
            "cardData": {
                "issuer": "VISA",
                "number": "4111111111114321",
                "name": "Test Cardholder",
                "expirationDate": "12/2030",
                "cvv": "123"
            }
        })
    }

    #[test]
    fn test_last_four_digits() {
        assert_eq!(last_four_digits("4111111111114321"), "4321");
        assert_eq!(last_four_digits("42"), "42");
        assert_eq!(last_four_digits(""), "");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_get_payment_missing_ticket_id_is_bad_request(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let (_user, token) = create_user_with_session(&pool).await;

        let response = app
            .get("/payments")
            .add_header(add_auth_headers(&token).0, add_auth_headers(&token).1)
            .await;
        response.assert_status_bad_request();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_get_payment_unknown_ticket_is_not_found(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let (_user, token) = create_user_with_session(&pool).await;

        let response = app
            .get("/payments?ticketId=9999")
            .add_header(add_auth_headers(&token).0, add_auth_headers(&token).1)
            .await;
        response.assert_status_not_found();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_get_payment_for_other_users_ticket_is_unauthorized(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let (owner, _owner_token) = create_user_with_session(&pool).await;
        let enrollment = create_test_enrollment(&pool, owner.id).await;
        let ticket_type = create_ticket_type(&pool, false, true).await;
        let ticket = create_ticket(&pool, enrollment.id, ticket_type.id, TicketStatus::Reserved).await;

        let (_intruder, intruder_token) = create_user_with_session(&pool).await;

        let response = app
            .get(&format!("/payments?ticketId={}", ticket.id))
            .add_header(add_auth_headers(&intruder_token).0, add_auth_headers(&intruder_token).1)
            .await;
        response.assert_status_unauthorized();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_get_payment_unpaid_ticket_returns_null(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let (user, token) = create_user_with_session(&pool).await;
        let enrollment = create_test_enrollment(&pool, user.id).await;
        let ticket_type = create_ticket_type(&pool, false, true).await;
        let ticket = create_ticket(&pool, enrollment.id, ticket_type.id, TicketStatus::Reserved).await;

        let response = app
            .get(&format!("/payments?ticketId={}", ticket.id))
            .add_header(add_auth_headers(&token).0, add_auth_headers(&token).1)
            .await;
        response.assert_status_ok();

        let payment: Option<PaymentResponse> = response.json();
        assert!(payment.is_none());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_get_payment_returns_payment(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let (user, token) = create_user_with_session(&pool).await;
        let enrollment = create_test_enrollment(&pool, user.id).await;
        let ticket_type = create_ticket_type(&pool, false, true).await;
        let ticket = create_ticket(&pool, enrollment.id, ticket_type.id, TicketStatus::Reserved).await;

        app.post("/payments/process")
            .add_header(add_auth_headers(&token).0, add_auth_headers(&token).1)
            .json(&card_payload(ticket.id))
            .await
            .assert_status_ok();

        let response = app
            .get(&format!("/payments?ticketId={}", ticket.id))
            .add_header(add_auth_headers(&token).0, add_auth_headers(&token).1)
            .await;
        response.assert_status_ok();

        let payment: Option<PaymentResponse> = response.json();
        let payment = payment.unwrap();
        assert_eq!(payment.ticket_id, ticket.id);
        assert_eq!(payment.card_issuer, "VISA");
        assert_eq!(payment.card_last_digits, "4321");
        assert_eq!(payment.value, ticket_type.price);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_payment_missing_fields_is_bad_request(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let (_user, token) = create_user_with_session(&pool).await;

        let response = app
            .post("/payments/process")
            .add_header(add_auth_headers(&token).0, add_auth_headers(&token).1)
            .json(&json!({}))
            .await;
        response.assert_status_bad_request();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_payment_unknown_ticket_is_not_found(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let (_user, token) = create_user_with_session(&pool).await;

        let response = app
            .post("/payments/process")
            .add_header(add_auth_headers(&token).0, add_auth_headers(&token).1)
            .json(&card_payload(9999))
            .await;
        response.assert_status_not_found();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_payment_for_other_users_ticket_is_unauthorized(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let (owner, _owner_token) = create_user_with_session(&pool).await;
        let enrollment = create_test_enrollment(&pool, owner.id).await;
        let ticket_type = create_ticket_type(&pool, false, true).await;
        let ticket = create_ticket(&pool, enrollment.id, ticket_type.id, TicketStatus::Reserved).await;

        let (_intruder, intruder_token) = create_user_with_session(&pool).await;

        let response = app
            .post("/payments/process")
            .add_header(add_auth_headers(&intruder_token).0, add_auth_headers(&intruder_token).1)
            .json(&card_payload(ticket.id))
            .await;
        response.assert_status_unauthorized();

        // Nothing changed for the owner's ticket
        let status: String = sqlx::query_scalar!("SELECT status FROM tickets WHERE id = $1", ticket.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(status, "RESERVED");

        let payments: i64 = sqlx::query_scalar!("SELECT COUNT(*) as \"count!\" FROM payments")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(payments, 0);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_payment_records_payment_and_marks_paid(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let (user, token) = create_user_with_session(&pool).await;
        let enrollment = create_test_enrollment(&pool, user.id).await;
        let ticket_type = create_ticket_type(&pool, false, true).await;
        let ticket = create_ticket(&pool, enrollment.id, ticket_type.id, TicketStatus::Reserved).await;

        let response = app
            .post("/payments/process")
            .add_header(add_auth_headers(&token).0, add_auth_headers(&token).1)
            .json(&card_payload(ticket.id))
            .await;
        response.assert_status_ok();

        let payment: PaymentResponse = response.json();
        assert_eq!(payment.ticket_id, ticket.id);
        assert_eq!(payment.card_last_digits, "4321");
        // Charged amount always comes from the ticket type, not the client
        assert_eq!(payment.value, ticket_type.price);

        let status: String = sqlx::query_scalar!("SELECT status FROM tickets WHERE id = $1", ticket.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(status, "PAID");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_payment_twice_is_conflict(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let (user, token) = create_user_with_session(&pool).await;
        let enrollment = create_test_enrollment(&pool, user.id).await;
        let ticket_type = create_ticket_type(&pool, false, true).await;
        let ticket = create_ticket(&pool, enrollment.id, ticket_type.id, TicketStatus::Reserved).await;

        app.post("/payments/process")
            .add_header(add_auth_headers(&token).0, add_auth_headers(&token).1)
            .json(&card_payload(ticket.id))
            .await
            .assert_status_ok();

        let response = app
            .post("/payments/process")
            .add_header(add_auth_headers(&token).0, add_auth_headers(&token).1)
            .json(&card_payload(ticket.id))
            .await;
        response.assert_status(axum::http::StatusCode::CONFLICT);

        let payments: i64 = sqlx::query_scalar!(
            "SELECT COUNT(*) as \"count!\" FROM payments WHERE ticket_id = $1",
            ticket.id
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(payments, 1);
    }
}
