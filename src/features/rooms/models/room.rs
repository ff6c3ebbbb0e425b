use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::features::rooms::dtos::RoomResponseDto;

#[derive(Debug, Clone, FromRow)]
pub struct Room {
    pub id: i64,
    pub title: String,
    pub annotations: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Room> for RoomResponseDto {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            title: room.title,
            annotations: room.annotations,
            created_at: room.created_at,
            updated_at: room.updated_at,
        }
    }
}
