mod attachment_service;

pub use attachment_service::{AttachmentService, UploadMeta};
