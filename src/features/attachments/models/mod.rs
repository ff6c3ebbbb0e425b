mod attachment;

pub use attachment::{Attachment, NewAttachment};

#[cfg(test)]
pub use attachment::attachment_key;
