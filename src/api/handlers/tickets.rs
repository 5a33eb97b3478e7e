use crate::{
    AppState,
    api::models::{
        tickets::{TicketCreate, TicketResponse, TicketTypeResponse},
        users::CurrentUser,
    },
    db::errors::DbError,
    db::handlers::{Enrollments, Tickets},
    db::models::tickets::TicketCreateDBRequest,
    errors::{Error, Result},
};
use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

/// List the available ticket types
#[utoipa::path(
    get,
    path = "/tickets/types",
    responses(
        (status = 200, description = "List of ticket types", body = Vec<TicketTypeResponse>),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn list_ticket_types(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<TicketTypeResponse>>> {
    let mut conn = state.db.acquire().await.map_err(DbError::from)?;

    let types = Tickets::new(&mut conn).list_types().await?;
    Ok(Json(types.into_iter().map(TicketTypeResponse::from).collect()))
}

/// Get the caller's ticket
#[utoipa::path(
    get,
    path = "/tickets",
    responses(
        (status = 200, description = "The user's ticket", body = TicketResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No enrollment or no ticket for this user")
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn get_ticket(State(state): State<AppState>, user: CurrentUser) -> Result<Json<TicketResponse>> {
    let mut conn = state.db.acquire().await.map_err(DbError::from)?;

    let enrollment = Enrollments::new(&mut conn)
        .find_by_user_id(user.id)
        .await?
        .ok_or(Error::NotFound {
            resource: "enrollment".to_string(),
            id: user.id.to_string(),
        })?;

    let tickets = Tickets::new(&mut conn).find_by_enrollment_id(enrollment.id).await?;
    // Oldest ticket wins when several exist
    let ticket = tickets.into_iter().next().ok_or(Error::NotFound {
        resource: "ticket".to_string(),
        id: enrollment.id.to_string(),
    })?;

    Ok(Json(TicketResponse::from(ticket)))
}

/// Reserve a ticket for the caller
#[utoipa::path(
    post,
    path = "/tickets",
    request_body = TicketCreate,
    responses(
        (status = 201, description = "Ticket reserved", body = TicketResponse),
        (status = 400, description = "Missing ticketTypeId or unknown ticket type"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "No enrollment for this user")
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn create_ticket(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<TicketCreate>,
) -> Result<(StatusCode, Json<TicketResponse>)> {
    let ticket_type_id = request.ticket_type_id.ok_or(Error::BadRequest {
        message: "ticketTypeId is required".to_string(),
    })?;

    let mut conn = state.db.acquire().await.map_err(DbError::from)?;

    let enrollment = Enrollments::new(&mut conn)
        .find_by_user_id(user.id)
        .await?
        .ok_or(Error::NotFound {
            resource: "enrollment".to_string(),
            id: user.id.to_string(),
        })?;

    // An unknown ticket type surfaces as an FK violation, mapped to 400
    let ticket = Tickets::new(&mut conn)
        .create(&TicketCreateDBRequest {
            enrollment_id: enrollment.id,
            ticket_type_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(TicketResponse::from(ticket))))
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

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_ticket_types_requires_auth(pool: PgPool) {
        let app = create_test_app(pool).await;

        let response = app.get("/tickets/types").await;
        response.assert_status_unauthorized();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_ticket_types_returns_all(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let (_user, token) = create_user_with_session(&pool).await;
        create_ticket_type(&pool, true, false).await;
        create_ticket_type(&pool, false, true).await;

        let response = app
            .get("/tickets/types")
            .add_header(add_auth_headers(&token).0, add_auth_headers(&token).1)
            .await;
        response.assert_status_ok();

        let types: Vec<TicketTypeResponse> = response.json();
        assert_eq!(types.len(), 2);
        assert!(types[0].is_remote);
        assert!(types[1].includes_hotel);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_ticket_types_empty_is_ok(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let (_user, token) = create_user_with_session(&pool).await;

        let response = app
            .get("/tickets/types")
            .add_header(add_auth_headers(&token).0, add_auth_headers(&token).1)
            .await;
        response.assert_status_ok();

        let types: Vec<TicketTypeResponse> = response.json();
        assert!(types.is_empty());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_get_ticket_without_enrollment_is_not_found(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let (_user, token) = create_user_with_session(&pool).await;

        let response = app
            .get("/tickets")
            .add_header(add_auth_headers(&token).0, add_auth_headers(&token).1)
            .await;
        response.assert_status_not_found();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_get_ticket_without_ticket_is_not_found(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let (user, token) = create_user_with_session(&pool).await;
        create_test_enrollment(&pool, user.id).await;

        let response = app
            .get("/tickets")
            .add_header(add_auth_headers(&token).0, add_auth_headers(&token).1)
            .await;
        response.assert_status_not_found();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_get_ticket_returns_ticket_with_type(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let (user, token) = create_user_with_session(&pool).await;
        let enrollment = create_test_enrollment(&pool, user.id).await;
        let ticket_type = create_ticket_type(&pool, false, true).await;
        let created = create_ticket(&pool, enrollment.id, ticket_type.id, TicketStatus::Reserved).await;

        let response = app
            .get("/tickets")
            .add_header(add_auth_headers(&token).0, add_auth_headers(&token).1)
            .await;
        response.assert_status_ok();

        let ticket: TicketResponse = response.json();
        assert_eq!(ticket.id, created.id);
        assert_eq!(ticket.enrollment_id, enrollment.id);
        assert_eq!(ticket.status, TicketStatus::Reserved);
        assert_eq!(ticket.ticket_type.id, ticket_type.id);
        assert!(ticket.ticket_type.includes_hotel);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_get_ticket_returns_oldest_when_several_exist(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let (user, token) = create_user_with_session(&pool).await;
        let enrollment = create_test_enrollment(&pool, user.id).await;
        let ticket_type = create_ticket_type(&pool, false, true).await;
        let first = create_ticket(&pool, enrollment.id, ticket_type.id, TicketStatus::Paid).await;
        create_ticket(&pool, enrollment.id, ticket_type.id, TicketStatus::Reserved).await;

        let response = app
            .get("/tickets")
            .add_header(add_auth_headers(&token).0, add_auth_headers(&token).1)
            .await;
        response.assert_status_ok();

        let ticket: TicketResponse = response.json();
        assert_eq!(ticket.id, first.id);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_ticket_missing_type_is_bad_request(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let (user, token) = create_user_with_session(&pool).await;
        create_test_enrollment(&pool, user.id).await;

        let response = app
            .post("/tickets")
            .add_header(add_auth_headers(&token).0, add_auth_headers(&token).1)
            .json(&json!({}))
            .await;
        response.assert_status_bad_request();

        let count: i64 = sqlx::query_scalar!("SELECT COUNT(*) as \"count!\" FROM tickets")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_ticket_without_enrollment_is_not_found(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let (_user, token) = create_user_with_session(&pool).await;
        let ticket_type = create_ticket_type(&pool, false, true).await;

        let response = app
            .post("/tickets")
            .add_header(add_auth_headers(&token).0, add_auth_headers(&token).1)
            .json(&json!({"ticketTypeId": ticket_type.id}))
            .await;
        response.assert_status_not_found();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_ticket_unknown_type_is_bad_request(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let (user, token) = create_user_with_session(&pool).await;
        create_test_enrollment(&pool, user.id).await;

        let response = app
            .post("/tickets")
            .add_header(add_auth_headers(&token).0, add_auth_headers(&token).1)
            .json(&json!({"ticketTypeId": 9999}))
            .await;
        response.assert_status_bad_request();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_ticket_reserves_ticket(pool: PgPool) {
        let app = create_test_app(pool.clone()).await;
        let (user, token) = create_user_with_session(&pool).await;
        let enrollment = create_test_enrollment(&pool, user.id).await;
        let ticket_type = create_ticket_type(&pool, false, true).await;

        let response = app
            .post("/tickets")
            .add_header(add_auth_headers(&token).0, add_auth_headers(&token).1)
            .json(&json!({"ticketTypeId": ticket_type.id}))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);

        let ticket: TicketResponse = response.json();
        assert_eq!(ticket.enrollment_id, enrollment.id);
        assert_eq!(ticket.status, TicketStatus::Reserved);
        assert_eq!(ticket.ticket_type.id, ticket_type.id);
        assert_eq!(ticket.ticket_type.price, ticket_type.price);
    }
}
