pub mod checksum;
pub mod constants;
pub mod content_disposition;
pub mod serde_helpers;
pub mod test_helpers;
pub mod types;
