mod jwks;
mod validator;

pub mod dto;
pub mod handler;
pub mod model;
pub mod routes;

pub use jwks::{JwksClient, OidcDiscovery};
pub use validator::JwtValidator;
