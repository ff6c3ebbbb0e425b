pub mod room_handler;

pub use room_handler::*;
