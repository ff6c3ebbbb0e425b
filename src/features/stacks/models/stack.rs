use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::features::stacks::dtos::StackResponseDto;

#[derive(Debug, Clone, FromRow)]
pub struct Stack {
    pub id: i64,
    pub title: String,
    pub room_id: Option<i64>,
    pub annotations: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Stack> for StackResponseDto {
    fn from(stack: Stack) -> Self {
        Self {
            id: stack.id,
            title: stack.title,
            room_id: stack.room_id,
            annotations: stack.annotations,
            created_at: stack.created_at,
            updated_at: stack.updated_at,
        }
    }
}
