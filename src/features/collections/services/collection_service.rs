use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::collections::dtos::{
    CollectionResponseDto, CreateCollectionDto, UpdateCollectionDto,
};
use crate::features::collections::repository::CollectionRepository;
use crate::shared::types::PaginationQuery;

pub struct CollectionService {
    repository: Arc<dyn CollectionRepository>,
}

impl CollectionService {
    pub fn new(repository: Arc<dyn CollectionRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &PaginationQuery) -> Result<(Vec<CollectionResponseDto>, i64)> {
        let (collections, total) = self.repository.list(query).await?;
        Ok((collections.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get(&self, id: i64) -> Result<CollectionResponseDto> {
        self.repository
            .find(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Collection not found".to_string()))
    }

    pub async fn create(&self, dto: CreateCollectionDto) -> Result<CollectionResponseDto> {
        let collection = self.repository.insert(&dto).await?;
        tracing::info!(collection_id = collection.id, "Collection created");
        Ok(collection.into())
    }

    pub async fn update(&self, id: i64, dto: UpdateCollectionDto) -> Result<CollectionResponseDto> {
        let collection = self
            .repository
            .update(id, &dto)
            .await?
            .ok_or_else(|| AppError::NotFound("Collection not found".to_string()))?;

        tracing::info!(collection_id = collection.id, "Collection updated");
        Ok(collection.into())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound("Collection not found".to_string()));
        }
        tracing::info!(collection_id = id, "Collection deleted");
        Ok(())
    }
}
