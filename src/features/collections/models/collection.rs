use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::features::collections::dtos::CollectionResponseDto;

#[derive(Debug, Clone, FromRow)]
pub struct Collection {
    pub id: i64,
    pub title: String,
    pub annotations: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Collection> for CollectionResponseDto {
    fn from(collection: Collection) -> Self {
        Self {
            id: collection.id,
            title: collection.title,
            annotations: collection.annotations,
            created_at: collection.created_at,
            updated_at: collection.updated_at,
        }
    }
}
