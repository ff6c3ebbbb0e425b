//! File attachments for inventory items.
//!
//! Bytes live in the object store under `item_{item_id}/attachments/{attachment_id}`;
//! metadata and the SHA-256 checksum live in the `attachments` table. The
//! checksum is only written once the blob upload has succeeded.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/items/{item_id}/attachments` | Yes | List attachments of an item |
//! | POST | `/items/{item_id}/attachment` | Yes | Upload attachment (multipart `file`) |
//! | GET | `/items/{item_id}/attachment/{attachment_id}` | Yes | Download attachment |
//! | DELETE | `/items/{item_id}/attachment/{attachment_id}` | Yes | Delete attachment |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;

pub use repository::PgAttachmentRepository;
pub use services::AttachmentService;
