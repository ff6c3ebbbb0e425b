//! Collections group items by what they belong to (a hobby, a household, a project).
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/collections` | Yes | List collections (paginated) |
//! | POST | `/collections` | Yes | Create collection |
//! | GET | `/collections/{collection_id}` | Yes | Get collection |
//! | PUT | `/collections/{collection_id}` | Yes | Update collection |
//! | DELETE | `/collections/{collection_id}` | Yes | Delete collection, detaching its items |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;

pub use repository::PgCollectionRepository;
pub use services::CollectionService;
