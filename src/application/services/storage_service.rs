use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use crate::application::error::UploadError;

/// Bytes of one file part. Read-side failures (size limit, malformed body)
/// arrive as stream items.
pub type ByteStream<'a> = BoxStream<'a, Result<Bytes, UploadError>>;

/// Byte sink the upload pipeline persists file parts into.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Makes the sink ready to receive files (e.g. creates the directory).
    ///
    /// Fails with `StorageUnavailable` when that is not possible.
    async fn prepare(&self) -> Result<(), UploadError>;

    /// Writes `content` under `file_name`, replacing any existing entry.
    ///
    /// Returns the number of bytes written. Write failures are reported as
    /// `StorageWriteFailed`; an error item from `content` is returned as-is
    /// after the partial entry has been removed.
    async fn store(&self, file_name: &str, content: ByteStream<'_>) -> Result<u64, UploadError>;

    async fn remove(&self, file_name: &str) -> Result<(), UploadError>;
}
