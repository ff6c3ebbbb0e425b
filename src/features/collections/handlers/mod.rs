pub mod collection_handler;

pub use collection_handler::*;
