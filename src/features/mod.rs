pub mod attachments;
pub mod auth;
pub mod collections;
pub mod health;
pub mod items;
pub mod rooms;
pub mod stacks;
pub mod tags;
