//! Database models for hotels and rooms.

use crate::types::{HotelId, RoomId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database response for a hotel row
#[derive(Debug, Clone, FromRow)]
pub struct HotelDBResponse {
    pub id: HotelId,
    pub name: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database response for a room row
#[derive(Debug, Clone, FromRow)]
pub struct RoomDBResponse {
    pub id: RoomId,
    pub hotel_id: HotelId,
    pub name: String,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database response for a hotel with its ordered rooms
#[derive(Debug, Clone)]
pub struct HotelWithRoomsDBResponse {
    pub hotel: HotelDBResponse,
    pub rooms: Vec<RoomDBResponse>,
}
