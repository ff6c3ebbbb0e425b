//! Inventory items, the records attachments hang off.
//!
//! An item may belong to one collection and sit at one place on a stack
//! (`stack_id`, `shelf`, `slot`). Tags are listed inline on every item.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/items` | Yes | List items (paginated, filterable by collection, stack and tags) |
//! | POST | `/items` | Yes | Create item |
//! | GET | `/items/{item_id}` | Yes | Get item |
//! | PUT | `/items/{item_id}` | Yes | Update item |
//! | DELETE | `/items/{item_id}` | Yes | Delete item without attachments |
//! | PUT | `/items/{item_id}/tag/{tag_id}` | Yes | Add tag to item |
//! | DELETE | `/items/{item_id}/tag/{tag_id}` | Yes | Remove tag from item |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;

pub use repository::{ItemRepository, PgItemRepository};
pub use services::ItemService;
