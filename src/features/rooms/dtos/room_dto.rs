use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request DTO for creating a room
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRoomDto {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    #[schema(example = "Basement")]
    pub title: String,

    /// Free-form JSON kept alongside the room
    pub annotations: Option<serde_json::Value>,
}

/// Request DTO for updating a room. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateRoomDto {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    pub annotations: Option<serde_json::Value>,
}

/// Response DTO for a room
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoomResponseDto {
    pub id: i64,
    pub title: String,
    pub annotations: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response DTO for room deletion
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteRoomResponseDto {
    pub deleted: bool,
}
