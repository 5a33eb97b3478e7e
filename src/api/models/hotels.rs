use crate::db::models::hotels::{HotelDBResponse, HotelWithRoomsDBResponse, RoomDBResponse};
use crate::types::{HotelId, RoomId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelResponse {
    pub id: HotelId,
    pub name: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub id: RoomId,
    pub hotel_id: HotelId,
    pub name: String,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelWithRoomsResponse {
    pub id: HotelId,
    pub name: String,
    pub image: String,
    pub rooms: Vec<RoomResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Conversions
impl From<HotelDBResponse> for HotelResponse {
    fn from(db: HotelDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            image: db.image,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<RoomDBResponse> for RoomResponse {
    fn from(db: RoomDBResponse) -> Self {
        Self {
            id: db.id,
            hotel_id: db.hotel_id,
            name: db.name,
            capacity: db.capacity,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<HotelWithRoomsDBResponse> for HotelWithRoomsResponse {
    fn from(db: HotelWithRoomsDBResponse) -> Self {
        Self {
            id: db.hotel.id,
            name: db.hotel.name,
            image: db.hotel.image,
            rooms: db.rooms.into_iter().map(RoomResponse::from).collect(),
            created_at: db.hotel.created_at,
            updated_at: db.hotel.updated_at,
        }
    }
}
