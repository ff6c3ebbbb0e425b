//! Tags label items across collections and stacks.
//!
//! Linking a tag to an item goes through the item routes
//! (`PUT`/`DELETE /items/{item_id}/tag/{tag_id}`); this feature owns the
//! `item_tags` table behind them.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/tags` | Yes | List tags with item counts (paginated) |
//! | POST | `/tags` | Yes | Create tag |
//! | GET | `/tags/{tag_id}` | Yes | Get tag |
//! | PUT | `/tags/{tag_id}` | Yes | Update tag |
//! | DELETE | `/tags/{tag_id}` | Yes | Delete tag and its item links |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;

pub use repository::PgTagRepository;
pub use services::TagService;
