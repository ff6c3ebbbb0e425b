use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::attachments::{dtos as attachments_dtos, handlers as attachments_handlers};
use crate::features::auth;
use crate::features::collections::{dtos as collections_dtos, handlers as collections_handlers};
use crate::features::health::handler as health_handler;
use crate::features::items::{dtos as items_dtos, handlers as items_handlers};
use crate::features::rooms::{dtos as rooms_dtos, handlers as rooms_handlers};
use crate::features::stacks::{dtos as stacks_dtos, handlers as stacks_handlers};
use crate::features::tags::{dtos as tags_dtos, handlers as tags_handlers};
use crate::shared::types::{ApiResponse, Meta, StatusDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handler::get_me,
        // Items
        items_handlers::list_items,
        items_handlers::get_item,
        items_handlers::create_item,
        items_handlers::update_item,
        items_handlers::delete_item,
        items_handlers::add_item_tag,
        items_handlers::remove_item_tag,
        // Collections
        collections_handlers::list_collections,
        collections_handlers::get_collection,
        collections_handlers::create_collection,
        collections_handlers::update_collection,
        collections_handlers::delete_collection,
        // Rooms
        rooms_handlers::list_rooms,
        rooms_handlers::get_room,
        rooms_handlers::create_room,
        rooms_handlers::update_room,
        rooms_handlers::delete_room,
        // Stacks
        stacks_handlers::list_stacks,
        stacks_handlers::get_stack,
        stacks_handlers::create_stack,
        stacks_handlers::update_stack,
        stacks_handlers::delete_stack,
        // Tags
        tags_handlers::list_tags,
        tags_handlers::get_tag,
        tags_handlers::create_tag,
        tags_handlers::update_tag,
        tags_handlers::delete_tag,
        // Attachments
        attachments_handlers::list_attachments,
        attachments_handlers::upload_attachment,
        attachments_handlers::download_attachment,
        attachments_handlers::delete_attachment,
        // Health
        health_handler::livez,
        health_handler::readyz,
    ),
    components(
        schemas(
            Meta,
            StatusDto,
            // Auth
            auth::dto::MeResponseDto,
            ApiResponse<auth::dto::MeResponseDto>,
            // Items
            items_dtos::ItemSortBy,
            items_dtos::SortDirection,
            items_dtos::CreateItemDto,
            items_dtos::UpdateItemDto,
            items_dtos::ItemResponseDto,
            items_dtos::DeleteItemResponseDto,
            ApiResponse<items_dtos::ItemResponseDto>,
            ApiResponse<Vec<items_dtos::ItemResponseDto>>,
            ApiResponse<items_dtos::DeleteItemResponseDto>,
            // Collections
            collections_dtos::CreateCollectionDto,
            collections_dtos::UpdateCollectionDto,
            collections_dtos::CollectionResponseDto,
            collections_dtos::DeleteCollectionResponseDto,
            ApiResponse<collections_dtos::CollectionResponseDto>,
            ApiResponse<Vec<collections_dtos::CollectionResponseDto>>,
            ApiResponse<collections_dtos::DeleteCollectionResponseDto>,
            // Rooms
            rooms_dtos::CreateRoomDto,
            rooms_dtos::UpdateRoomDto,
            rooms_dtos::RoomResponseDto,
            rooms_dtos::DeleteRoomResponseDto,
            ApiResponse<rooms_dtos::RoomResponseDto>,
            ApiResponse<Vec<rooms_dtos::RoomResponseDto>>,
            ApiResponse<rooms_dtos::DeleteRoomResponseDto>,
            // Stacks
            stacks_dtos::CreateStackDto,
            stacks_dtos::UpdateStackDto,
            stacks_dtos::StackResponseDto,
            stacks_dtos::DeleteStackResponseDto,
            ApiResponse<stacks_dtos::StackResponseDto>,
            ApiResponse<Vec<stacks_dtos::StackResponseDto>>,
            ApiResponse<stacks_dtos::DeleteStackResponseDto>,
            // Tags
            tags_dtos::CreateTagDto,
            tags_dtos::UpdateTagDto,
            tags_dtos::TagResponseDto,
            tags_dtos::TagSummaryDto,
            tags_dtos::DeleteTagResponseDto,
            ApiResponse<tags_dtos::TagResponseDto>,
            ApiResponse<Vec<tags_dtos::TagResponseDto>>,
            ApiResponse<tags_dtos::DeleteTagResponseDto>,
            // Attachments
            attachments_dtos::UploadAttachmentDto,
            attachments_dtos::AttachmentResponseDto,
            attachments_dtos::DeleteAttachmentResponseDto,
            ApiResponse<attachments_dtos::AttachmentResponseDto>,
            ApiResponse<Vec<attachments_dtos::AttachmentResponseDto>>,
            ApiResponse<attachments_dtos::DeleteAttachmentResponseDto>,
        )
    ),
    tags(
        (name = "auth", description = "Caller identity"),
        (name = "items", description = "Inventory items"),
        (name = "collections", description = "Groupings of items"),
        (name = "rooms", description = "Physical spaces holding stacks"),
        (name = "stacks", description = "Shelving units items are placed on"),
        (name = "tags", description = "Labels shared across items"),
        (name = "attachments", description = "Files attached to items"),
        (name = "internal", description = "Liveness and readiness checks"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Atlas Inventory API",
        version = "0.1.0",
        description = "Inventory tracking with item attachments",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
