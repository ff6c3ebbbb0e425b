use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::stacks::dtos::{
    CreateStackDto, ListStacksQuery, StackResponseDto, UpdateStackDto,
};
use crate::features::stacks::repository::StackRepository;

pub struct StackService {
    repository: Arc<dyn StackRepository>,
}

impl StackService {
    pub fn new(repository: Arc<dyn StackRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &ListStacksQuery) -> Result<(Vec<StackResponseDto>, i64)> {
        let (stacks, total) = self.repository.list(query).await?;
        Ok((stacks.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get(&self, id: i64) -> Result<StackResponseDto> {
        self.repository
            .find(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Stack not found".to_string()))
    }

    pub async fn create(&self, dto: CreateStackDto) -> Result<StackResponseDto> {
        let stack = self.repository.insert(&dto).await?;
        tracing::info!(stack_id = stack.id, room_id = ?stack.room_id, "Stack created");
        Ok(stack.into())
    }

    pub async fn update(&self, id: i64, dto: UpdateStackDto) -> Result<StackResponseDto> {
        let stack = self
            .repository
            .update(id, &dto)
            .await?
            .ok_or_else(|| AppError::NotFound("Stack not found".to_string()))?;

        tracing::info!(stack_id = stack.id, "Stack updated");
        Ok(stack.into())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound("Stack not found".to_string()));
        }
        tracing::info!(stack_id = id, "Stack deleted");
        Ok(())
    }
}
