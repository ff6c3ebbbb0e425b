/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Content type used when an upload does not declare one
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
