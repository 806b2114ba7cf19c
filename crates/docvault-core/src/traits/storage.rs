//! Blob store trait for document file contents.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use uuid::Uuid;

use crate::result::AppResult;

/// A byte stream type used for reading blob contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Key → bytes storage for uploaded document files.
///
/// Keys are full paths of the form `{uploads_dir}/{user_id}/{filename}`,
/// produced by [`BlobStore::upload_path`] and persisted on the document row.
/// The trait is defined here in `docvault-core` and implemented in
/// `docvault-storage`.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g. `"local"`).
    fn provider_type(&self) -> &str;

    /// Generate the key for `filename` uploaded by `owner`.
    ///
    /// Fails with a validation error when the filename has no usable final
    /// component (empty, `.` or `..`).
    fn upload_path(&self, owner: Uuid, filename: &str) -> AppResult<String>;

    /// Store `data` under `path`. Fails with a conflict if the key exists.
    async fn save(&self, path: &str, data: Bytes) -> AppResult<()>;

    /// Open the blob at `path` as a stream.
    async fn read(&self, path: &str) -> AppResult<ByteStream>;

    /// Remove the blob at `path`. Removing a missing blob is not an error.
    async fn remove(&self, path: &str) -> AppResult<()>;

    /// Whether a blob exists at `path`.
    async fn exists(&self, path: &str) -> AppResult<bool>;
}
