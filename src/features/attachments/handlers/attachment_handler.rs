use std::sync::Arc;

use axum::{
    body::Body,
    extract::{
        multipart::{Field, MultipartError},
        Multipart, Path, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::attachments::dtos::{
    AttachmentResponseDto, DeleteAttachmentResponseDto, UploadAttachmentDto,
};
use crate::features::attachments::services::{AttachmentService, UploadMeta};
use crate::shared::constants::DEFAULT_CONTENT_TYPE;
use crate::shared::content_disposition::content_disposition;
use crate::shared::types::ApiResponse;

/// Upload body written to an anonymous temporary file while it is received
struct SpooledUpload {
    meta: UploadMeta,
    file: tokio::fs::File,
}

/// Body limit overruns keep their 413; anything else is a malformed request
fn multipart_error(e: MultipartError) -> AppError {
    debug!("Failed to read multipart data: {}", e);
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Upload exceeds the maximum allowed size".to_string())
    } else {
        AppError::BadRequest(format!("Failed to read multipart data: {}", e.body_text()))
    }
}

async fn spool_field(mut field: Field<'_>) -> Result<SpooledUpload> {
    let filename = field.file_name().unwrap_or("unnamed").to_string();
    let content_type = field
        .content_type()
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();

    let spool = tempfile::tempfile()
        .map_err(|e| AppError::Internal(format!("Failed to create spool file: {}", e)))?;
    let mut file = tokio::fs::File::from_std(spool);
    let mut filesize: u64 = 0;

    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        file.write_all(&chunk)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to spool upload: {}", e)))?;
        filesize += chunk.len() as u64;
    }

    file.flush()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to spool upload: {}", e)))?;

    Ok(SpooledUpload {
        meta: UploadMeta {
            filename,
            content_type,
            filesize,
        },
        file,
    })
}

/// List attachments of an item
#[utoipa::path(
    get,
    path = "/items/{item_id}/attachments",
    params(
        ("item_id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "List of attachments", body = ApiResponse<Vec<AttachmentResponseDto>>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Item not found")
    ),
    tag = "attachments",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_attachments(
    State(service): State<Arc<AttachmentService>>,
    Path(item_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<AttachmentResponseDto>>>> {
    let attachments = service.list(item_id).await?;
    Ok(Json(ApiResponse::success(Some(attachments), None, None)))
}

/// Upload an attachment to an item
///
/// The SHA-256 checksum is computed server-side and returned in the record.
#[utoipa::path(
    post,
    path = "/items/{item_id}/attachment",
    params(
        ("item_id" = i64, Path, description = "Item ID")
    ),
    request_body(
        content = UploadAttachmentDto,
        content_type = "multipart/form-data",
        description = "File to attach to the item"
    ),
    responses(
        (status = 201, description = "Attachment uploaded successfully", body = ApiResponse<AttachmentResponseDto>),
        (status = 400, description = "Missing or unreadable file part"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Item not found"),
        (status = 413, description = "Upload exceeds the maximum allowed size"),
        (status = 500, description = "Upload failed")
    ),
    tag = "attachments",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_attachment(
    State(service): State<Arc<AttachmentService>>,
    Path(item_id): Path<i64>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<AttachmentResponseDto>>)> {
    let mut upload: Option<SpooledUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some("file") {
            upload = Some(spool_field(field).await?);
        } else {
            debug!("Ignoring unknown field: {:?}", field.name());
        }
    }

    let mut upload = upload.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;

    let attachment = service
        .create(item_id, upload.meta, &mut upload.file)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(attachment),
            Some("Attachment uploaded successfully".to_string()),
            None,
        )),
    ))
}

/// Download an attachment
///
/// The body is streamed from the object store.
#[utoipa::path(
    get,
    path = "/items/{item_id}/attachment/{attachment_id}",
    params(
        ("item_id" = i64, Path, description = "Item ID"),
        ("attachment_id" = i64, Path, description = "Attachment ID")
    ),
    responses(
        (status = 200, description = "Attachment content with its stored Content-Type"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Item, attachment or stored object not found")
    ),
    tag = "attachments",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn download_attachment(
    State(service): State<Arc<AttachmentService>>,
    Path((item_id, attachment_id)): Path<(i64, i64)>,
) -> Result<Response> {
    let (attachment, stream) = service.open(item_id, attachment_id).await?;

    let content_type = if attachment.content_type.is_empty() {
        DEFAULT_CONTENT_TYPE.to_string()
    } else {
        attachment.content_type
    };
    let disposition = content_disposition(&attachment.filename);

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from_stream(stream),
    )
        .into_response())
}

/// Delete an attachment
#[utoipa::path(
    delete,
    path = "/items/{item_id}/attachment/{attachment_id}",
    params(
        ("item_id" = i64, Path, description = "Item ID"),
        ("attachment_id" = i64, Path, description = "Attachment ID")
    ),
    responses(
        (status = 200, description = "Attachment deleted", body = ApiResponse<DeleteAttachmentResponseDto>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Item or attachment not found"),
        (status = 500, description = "Object store delete failed")
    ),
    tag = "attachments",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_attachment(
    State(service): State<Arc<AttachmentService>>,
    Path((item_id, attachment_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<DeleteAttachmentResponseDto>>> {
    service.delete(item_id, attachment_id).await?;

    Ok(Json(ApiResponse::success(
        Some(DeleteAttachmentResponseDto { deleted: true }),
        Some("Attachment deleted successfully".to_string()),
        None,
    )))
}
