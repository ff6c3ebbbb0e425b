use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::features::items::dtos::ItemResponseDto;
use crate::features::tags::dtos::TagSummaryDto;

/// Database model for an inventory item
#[derive(Debug, Clone, FromRow)]
pub struct Item {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub collection_id: Option<i64>,
    pub stack_id: Option<i64>,
    pub shelf: Option<i32>,
    pub slot: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<(Item, Vec<TagSummaryDto>)> for ItemResponseDto {
    fn from((item, tags): (Item, Vec<TagSummaryDto>)) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            collection_id: item.collection_id,
            stack_id: item.stack_id,
            shelf: item.shelf,
            slot: item.slot,
            tags,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}
