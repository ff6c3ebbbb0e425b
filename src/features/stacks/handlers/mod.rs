pub mod stack_handler;

pub use stack_handler::*;
