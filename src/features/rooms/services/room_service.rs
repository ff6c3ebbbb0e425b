use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::rooms::dtos::{CreateRoomDto, RoomResponseDto, UpdateRoomDto};
use crate::features::rooms::repository::RoomRepository;
use crate::shared::types::PaginationQuery;

pub struct RoomService {
    repository: Arc<dyn RoomRepository>,
}

impl RoomService {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &PaginationQuery) -> Result<(Vec<RoomResponseDto>, i64)> {
        let (rooms, total) = self.repository.list(query).await?;
        Ok((rooms.into_iter().map(Into::into).collect(), total))
    }

    pub async fn get(&self, id: i64) -> Result<RoomResponseDto> {
        self.repository
            .find(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Room not found".to_string()))
    }

    pub async fn create(&self, dto: CreateRoomDto) -> Result<RoomResponseDto> {
        let room = self.repository.insert(&dto).await?;
        tracing::info!(room_id = room.id, "Room created");
        Ok(room.into())
    }

    pub async fn update(&self, id: i64, dto: UpdateRoomDto) -> Result<RoomResponseDto> {
        let room = self
            .repository
            .update(id, &dto)
            .await?
            .ok_or_else(|| AppError::NotFound("Room not found".to_string()))?;

        tracing::info!(room_id = room.id, "Room updated");
        Ok(room.into())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound("Room not found".to_string()));
        }
        tracing::info!(room_id = id, "Room deleted");
        Ok(())
    }
}
