//! Rooms are the physical spaces stacks stand in.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/rooms` | Yes | List rooms (paginated) |
//! | POST | `/rooms` | Yes | Create room |
//! | GET | `/rooms/{room_id}` | Yes | Get room |
//! | PUT | `/rooms/{room_id}` | Yes | Update room |
//! | DELETE | `/rooms/{room_id}` | Yes | Delete room, detaching its stacks |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;

pub use repository::PgRoomRepository;
pub use services::RoomService;
