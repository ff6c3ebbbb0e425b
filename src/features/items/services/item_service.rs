use std::collections::HashMap;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::items::dtos::{
    CreateItemDto, ItemResponseDto, ListItemsQuery, UpdateItemDto,
};
use crate::features::items::models::Item;
use crate::features::items::repository::ItemRepository;
use crate::features::tags::dtos::TagSummaryDto;
use crate::features::tags::repository::TagRepository;

pub struct ItemService {
    repository: Arc<dyn ItemRepository>,
    tags: Arc<dyn TagRepository>,
}

impl ItemService {
    pub fn new(repository: Arc<dyn ItemRepository>, tags: Arc<dyn TagRepository>) -> Self {
        Self { repository, tags }
    }

    /// Pairs each item with its tags, loaded in one query
    async fn with_tags(&self, items: Vec<Item>) -> Result<Vec<ItemResponseDto>> {
        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        let mut by_item: HashMap<i64, Vec<TagSummaryDto>> = HashMap::new();
        for link in self.tags.tags_for_items(&ids).await? {
            by_item.entry(link.item_id).or_default().push(link.into());
        }

        Ok(items
            .into_iter()
            .map(|item| {
                let tags = by_item.remove(&item.id).unwrap_or_default();
                (item, tags).into()
            })
            .collect())
    }

    async fn respond(&self, item: Item) -> Result<ItemResponseDto> {
        let mut items = self.with_tags(vec![item]).await?;
        items
            .pop()
            .ok_or_else(|| AppError::Internal("Item vanished while loading tags".to_string()))
    }

    async fn require_item(&self, id: i64) -> Result<Item> {
        self.repository
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Item not found".to_string()))
    }

    pub async fn list(&self, query: &ListItemsQuery) -> Result<(Vec<ItemResponseDto>, i64)> {
        let (items, total) = self.repository.list(query).await?;
        Ok((self.with_tags(items).await?, total))
    }

    pub async fn get(&self, id: i64) -> Result<ItemResponseDto> {
        let item = self.require_item(id).await?;
        self.respond(item).await
    }

    pub async fn create(&self, dto: CreateItemDto) -> Result<ItemResponseDto> {
        let item = self.repository.insert(&dto).await?;
        tracing::info!(item_id = item.id, "Item created");
        Ok((item, Vec::new()).into())
    }

    pub async fn update(&self, id: i64, dto: UpdateItemDto) -> Result<ItemResponseDto> {
        let item = self
            .repository
            .update(id, &dto)
            .await?
            .ok_or_else(|| AppError::NotFound("Item not found".to_string()))?;

        tracing::info!(item_id = item.id, "Item updated");
        self.respond(item).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        match self.repository.delete(id).await {
            Ok(true) => {
                tracing::info!(item_id = id, "Item deleted");
                Ok(())
            }
            Ok(false) => Err(AppError::NotFound("Item not found".to_string())),
            Err(e @ AppError::Conflict(_)) => {
                tracing::warn!(item_id = id, "Refusing to delete item with attachments");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Links a tag to an item; linking twice is a no-op
    pub async fn add_tag(&self, item_id: i64, tag_id: i64) -> Result<ItemResponseDto> {
        let item = self.require_item(item_id).await?;
        if self.tags.find(tag_id).await?.is_none() {
            return Err(AppError::NotFound("Tag not found".to_string()));
        }

        self.tags.link(item_id, tag_id).await?;
        tracing::info!(item_id, tag_id, "Tag added to item");
        self.respond(item).await
    }

    /// Unlinks a tag from an item; unlinking an absent link is a no-op
    pub async fn remove_tag(&self, item_id: i64, tag_id: i64) -> Result<ItemResponseDto> {
        let item = self.require_item(item_id).await?;
        if self.tags.find(tag_id).await?.is_none() {
            return Err(AppError::NotFound("Tag not found".to_string()));
        }

        self.tags.unlink(item_id, tag_id).await?;
        tracing::info!(item_id, tag_id, "Tag removed from item");
        self.respond(item).await
    }
}
