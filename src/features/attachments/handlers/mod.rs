pub mod attachment_handler;

pub use attachment_handler::*;
