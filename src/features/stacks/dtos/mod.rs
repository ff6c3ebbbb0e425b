mod stack_dto;

pub use stack_dto::*;
