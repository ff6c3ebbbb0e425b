//! Incremental SHA-256 over async readers.

use sha2::{Digest, Sha256};
use tokio::io::{AsyncRead, AsyncReadExt};

/// Hash everything `reader` yields, reading at most `chunk_size` bytes at a time.
///
/// Only one chunk buffer is ever allocated, so memory use does not depend on
/// the length of the input. Returns the lowercase hex digest.
pub async fn sha256_hex<R>(reader: &mut R, chunk_size: usize) -> std::io::Result<String>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; chunk_size.max(1)];

    loop {
        let read = reader.read(&mut buf).await?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }

    Ok(hex::encode(hasher.finalize()))
}
