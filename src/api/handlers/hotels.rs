use crate::{
    AppState,
    api::models::{
        hotels::{HotelResponse, HotelWithRoomsResponse},
        users::CurrentUser,
    },
    db::errors::DbError,
    db::handlers::{Enrollments, Hotels, Tickets},
    db::models::tickets::TicketStatus,
    errors::{Error, Result},
    types::{HotelId, UserId},
};
use axum::{
    Json,
    extract::{Path, State},
};
use sqlx::PgConnection;
use tracing::instrument;

/// Check that the caller is allowed to see hotel data.
///
/// A user qualifies once they have an enrollment, a ticket on it, the ticket
/// is paid for, and the ticket type is in-person with hotel included. Each
/// failed step maps to its own status code so clients can tell the stages
/// apart.
async fn verify_hotel_access(conn: &mut PgConnection, user_id: UserId) -> Result<()> {
    let enrollment = Enrollments::new(conn)
        .find_by_user_id(user_id)
        .await?
        .ok_or(Error::NotFound {
            resource: "enrollment".to_string(),
            id: user_id.to_string(),
        })?;

    let tickets = Tickets::new(conn).find_by_enrollment_id(enrollment.id).await?;
    let Some(ticket) = tickets.into_iter().next() else {
        return Err(Error::NotFound {
            resource: "ticket".to_string(),
            id: enrollment.id.to_string(),
        });
    };

    if ticket.status != TicketStatus::Paid {
        return Err(Error::PaymentRequired {
            message: "Ticket has not been paid for".to_string(),
        });
    }

    if ticket.ticket_type.is_remote || !ticket.ticket_type.includes_hotel {
        return Err(Error::BadRequest {
            message: "Ticket does not include a hotel stay".to_string(),
        });
    }

    Ok(())
}

/// List all hotels
#[utoipa::path(
    get,
    path = "/hotels",
    responses(
        (status = 200, description = "List of hotels", body = Vec<HotelResponse>),
        (status = 400, description = "Ticket does not include a hotel stay"),
        (status = 401, description = "Not authenticated"),
        (status = 402, description = "Ticket not paid for"),
        (status = 404, description = "No enrollment or ticket for this user")
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn list_hotels(State(state): State<AppState>, user: CurrentUser) -> Result<Json<Vec<HotelResponse>>> {
    let mut conn = state.db.acquire().await.map_err(DbError::from)?;

    verify_hotel_access(&mut conn, user.id).await?;

    let hotels = Hotels::new(&mut conn).list().await?;
    Ok(Json(hotels.into_iter().map(HotelResponse::from).collect()))
}

/// Get a hotel with its rooms
#[utoipa::path(
    get,
    path = "/hotels/{hotel_id}",
    params(
        ("hotel_id" = i32, Path, description = "Hotel ID")
    ),
    responses(
        (status = 200, description = "Hotel with rooms", body = HotelWithRoomsResponse),
        (status = 400, description = "Ticket does not include a hotel stay"),
        (status = 401, description = "Not authenticated"),
        (status = 402, description = "Ticket not paid for"),
        (status = 404, description = "Hotel not found, or no enrollment or ticket for this user")
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip_all, fields(hotel_id = hotel_id))]
pub async fn get_hotel(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(hotel_id): Path<HotelId>,
) -> Result<Json<HotelWithRoomsResponse>> {
    let mut conn = state.db.acquire().await.map_err(DbError::from)?;

    verify_hotel_access(&mut conn, user.id).await?;

    let hotel = Hotels::new(&mut conn)
        .find_with_rooms(hotel_id)
        .await?
        .ok_or(Error::NotFound {
            resource: "hotel".to_string(),
            id: hotel_id.to_string(),
        })?;

    Ok(Json(HotelWithRoomsResponse::from(hotel)))
}
