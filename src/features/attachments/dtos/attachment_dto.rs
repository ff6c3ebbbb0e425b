use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Multipart form schema for uploads (documentation only)
///
/// The handler reads the `file` part with axum's Multipart extractor.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadAttachmentDto {
    /// The file to upload
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Response DTO for an attachment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttachmentResponseDto {
    pub id: i64,
    pub item_id: i64,
    pub filename: String,
    pub content_type: String,
    /// Size in bytes
    pub filesize: i64,
    /// Lowercase hex SHA-256 of the content; null if the upload never completed
    pub checksum_sha256: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Response DTO for delete attachment operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteAttachmentResponseDto {
    pub deleted: bool,
}
