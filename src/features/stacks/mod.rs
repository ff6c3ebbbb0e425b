//! Stacks are shelving units; items sit on a numbered shelf and slot of one.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/stacks` | Yes | List stacks (paginated, optional `room_id` filter) |
//! | POST | `/stacks` | Yes | Create stack |
//! | GET | `/stacks/{stack_id}` | Yes | Get stack |
//! | PUT | `/stacks/{stack_id}` | Yes | Update stack |
//! | DELETE | `/stacks/{stack_id}` | Yes | Delete stack, detaching its items |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;

pub use repository::PgStackRepository;
pub use services::StackService;
