mod tag;

pub use tag::{ItemTag, Tag};
