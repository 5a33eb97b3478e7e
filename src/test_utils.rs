//! Test utilities for integration testing (available with `test-utils` feature).

use crate::api::models::users::CurrentUser;
use crate::db::handlers::Tickets;
use crate::db::models::{
    enrollments::EnrollmentDBResponse,
    hotels::HotelDBResponse,
    tickets::{TicketDBResponse, TicketStatus, TicketTypeDBResponse},
};
use crate::types::{EnrollmentId, TicketTypeId, UserId};
use axum_test::TestServer;
use rand::{Rng, distr::Alphanumeric};
use rust_decimal::Decimal;
use sqlx::PgPool;

pub async fn create_test_app(pool: PgPool) -> TestServer {
    let config = create_test_config();

    let app = crate::Application::new_with_pool(config, pool)
        .await
        .expect("Failed to create application");

    app.into_test_server()
}

pub fn create_test_config() -> crate::config::Config {
    crate::config::Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..Default::default()
    }
}

fn random_token() -> String {
    rand::rng().sample_iter(&Alphanumeric).take(32).map(char::from).collect()
}

/// Create a user with a valid session, returning the user and their bearer token.
pub async fn create_user_with_session(pool: &PgPool) -> (CurrentUser, String) {
    let suffix = random_token();
    let email = format!("user_{suffix}@example.com");

    let user_id: UserId = sqlx::query_scalar!(
        "INSERT INTO users (email, name) VALUES ($1, $2) RETURNING id",
        email,
        "Test User"
    )
    .fetch_one(pool)
    .await
    .expect("Failed to create test user");

    let token = random_token();
    sqlx::query!("INSERT INTO sessions (user_id, token) VALUES ($1, $2)", user_id, token)
        .execute(pool)
        .await
        .expect("Failed to create test session");

    (CurrentUser { id: user_id, email }, token)
}

pub fn add_auth_headers(token: &str) -> (String, String) {
    ("authorization".to_string(), format!("Bearer {token}"))
}

pub async fn create_test_enrollment(pool: &PgPool, user_id: UserId) -> EnrollmentDBResponse {
    sqlx::query_as!(
        EnrollmentDBResponse,
        "INSERT INTO enrollments (user_id, name) VALUES ($1, $2)
         RETURNING id, user_id, name, created_at, updated_at",
        user_id,
        "Test Attendee"
    )
    .fetch_one(pool)
    .await
    .expect("Failed to create test enrollment")
}

pub async fn create_ticket_type(pool: &PgPool, is_remote: bool, includes_hotel: bool) -> TicketTypeDBResponse {
    let name = match (is_remote, includes_hotel) {
        (true, _) => "Online",
        (false, true) => "In Person + Hotel",
        (false, false) => "In Person",
    };

    sqlx::query_as!(
        TicketTypeDBResponse,
        "INSERT INTO ticket_types (name, price, is_remote, includes_hotel) VALUES ($1, $2, $3, $4)
         RETURNING id, name, price, is_remote, includes_hotel, created_at, updated_at",
        name,
        Decimal::new(25_000, 2),
        is_remote,
        includes_hotel
    )
    .fetch_one(pool)
    .await
    .expect("Failed to create test ticket type")
}

pub async fn create_ticket(
    pool: &PgPool,
    enrollment_id: EnrollmentId,
    ticket_type_id: TicketTypeId,
    status: TicketStatus,
) -> TicketDBResponse {
    let status_str = match status {
        TicketStatus::Reserved => "RESERVED",
        TicketStatus::Paid => "PAID",
    };

    let ticket_id = sqlx::query_scalar!(
        "INSERT INTO tickets (enrollment_id, ticket_type_id, status) VALUES ($1, $2, $3) RETURNING id",
        enrollment_id,
        ticket_type_id,
        status_str
    )
    .fetch_one(pool)
    .await
    .expect("Failed to create test ticket");

    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    Tickets::new(&mut conn)
        .find_by_id(ticket_id)
        .await
        .expect("Failed to load test ticket")
        .expect("Test ticket should exist")
}

pub async fn create_hotel_with_rooms(pool: &PgPool, name: &str, room_count: i32) -> HotelDBResponse {
    let hotel = sqlx::query_as!(
        HotelDBResponse,
        "INSERT INTO hotels (name, image) VALUES ($1, $2)
         RETURNING id, name, image, created_at, updated_at",
        name,
        format!("https://images.example.com/{}.jpg", name.to_lowercase().replace(' ', "-"))
    )
    .fetch_one(pool)
    .await
    .expect("Failed to create test hotel");

    for n in 1..=room_count {
        sqlx::query!(
            "INSERT INTO rooms (hotel_id, name, capacity) VALUES ($1, $2, $3)",
            hotel.id,
            format!("Room {n:03}"),
            3
        )
        .execute(pool)
        .await
        .expect("Failed to create test room");
    }

    hotel
}
