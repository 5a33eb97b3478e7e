use crate::db::{
    errors::Result,
    models::hotels::{HotelDBResponse, HotelWithRoomsDBResponse, RoomDBResponse},
};
use crate::types::HotelId;
use sqlx::PgConnection;

pub struct Hotels<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Hotels<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// List all hotels. An empty list is a valid result, not an error.
    pub async fn list(&mut self) -> Result<Vec<HotelDBResponse>> {
        let hotels = sqlx::query_as!(
            HotelDBResponse,
            r#"
            SELECT id, name, image, created_at, updated_at
            FROM hotels
            ORDER BY id
            "#
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(hotels)
    }

    /// Fetch a hotel together with its rooms, ordered by room ID
    pub async fn find_with_rooms(&mut self, hotel_id: HotelId) -> Result<Option<HotelWithRoomsDBResponse>> {
        let hotel = sqlx::query_as!(
            HotelDBResponse,
            r#"
            SELECT id, name, image, created_at, updated_at
            FROM hotels
            WHERE id = $1
            "#,
            hotel_id
        )
        .fetch_optional(&mut *self.db)
        .await?;

        let Some(hotel) = hotel else {
            return Ok(None);
        };

        let rooms = sqlx::query_as!(
            RoomDBResponse,
            r#"
            SELECT id, hotel_id, name, capacity, created_at, updated_at
            FROM rooms
            WHERE hotel_id = $1
            ORDER BY id
            "#,
            hotel_id
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(Some(HotelWithRoomsDBResponse { hotel, rooms }))
    }
}
