use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::tags::dtos::{CreateTagDto, TagResponseDto, UpdateTagDto};
use crate::features::tags::repository::TagRepository;
use crate::shared::types::PaginationQuery;

pub struct TagService {
    repository: Arc<dyn TagRepository>,
}

impl TagService {
    pub fn new(repository: Arc<dyn TagRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &PaginationQuery) -> Result<(Vec<TagResponseDto>, i64)> {
        let (tags, total) = self.repository.list(query).await?;
        Ok((tags.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get(&self, id: i64) -> Result<TagResponseDto> {
        self.repository
            .find(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Tag not found".to_string()))
    }

    pub async fn create(&self, dto: CreateTagDto) -> Result<TagResponseDto> {
        let tag = self.repository.insert(&dto).await?;
        tracing::info!(tag_id = tag.id, name = %tag.name, "Tag created");
        Ok(tag.into())
    }

    pub async fn update(&self, id: i64, dto: UpdateTagDto) -> Result<TagResponseDto> {
        let tag = self
            .repository
            .update(id, &dto)
            .await?
            .ok_or_else(|| AppError::NotFound("Tag not found".to_string()))?;

        tracing::info!(tag_id = tag.id, "Tag updated");
        Ok(tag.into())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound("Tag not found".to_string()));
        }
        tracing::info!(tag_id = id, "Tag deleted");
        Ok(())
    }
}
