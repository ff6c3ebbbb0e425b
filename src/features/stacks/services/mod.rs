mod stack_service;

pub use stack_service::StackService;
