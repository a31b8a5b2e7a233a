mod local;

pub use local::LocalStore;

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::io::AsyncRead;

#[derive(Debug, Error)]
pub enum BlobStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Blob not found: {0}")]
    NotFound(String),
}

/// Async reader over one blob's bytes, for streaming responses.
pub type BlobReader = Box<dyn AsyncRead + Send + Unpin>;

/// Abstraction over blob storage backends.
/// Keys are server-generated filenames -- the raw blobs are meaningless
/// without the metadata DB.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, key: &str, data: Bytes) -> Result<(), BlobStoreError>;
    async fn get(&self, key: &str) -> Result<Bytes, BlobStoreError>;
    async fn stream(&self, key: &str) -> Result<BlobReader, BlobStoreError>;
    async fn exists(&self, key: &str) -> Result<bool, BlobStoreError>;
}

/// High-water mark of the last millisecond handed out as a bare filename.
static LAST_STAMP_MS: AtomicI64 = AtomicI64::new(0);

/// Generate a storage filename for an upload arriving at `now`.
///
/// Names are `recording-<epoch-millis>.webm`. When a second upload lands in
/// a millisecond that has already been handed out (or the clock steps
/// backwards), a random 8-hex suffix keeps the name unique.
pub fn storage_filename(now: DateTime<Utc>) -> String {
    let stamp = now.timestamp_millis();
    let prev = LAST_STAMP_MS.fetch_max(stamp, Ordering::SeqCst);

    if prev >= stamp {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        format!("recording-{stamp}-{}.webm", &suffix[..8])
    } else {
        format!("recording-{stamp}.webm")
    }
}
