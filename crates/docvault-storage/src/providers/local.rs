//! Local filesystem blob store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::debug;
use uuid::Uuid;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_core::traits::storage::{BlobStore, ByteStream};

/// Stores blobs as plain files below an uploads directory.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    /// Uploads directory; every key lives below it.
    root: PathBuf,
}

impl LocalBlobStore {
    /// Create a store rooted at `uploads_dir`, creating the directory.
    pub async fn new(uploads_dir: &str) -> AppResult<Self> {
        let root = PathBuf::from(uploads_dir);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create uploads directory: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Turn a key into a filesystem path, refusing keys outside the root.
    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let candidate = PathBuf::from(path);
        let escapes = candidate
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir));
        if escapes || !candidate.starts_with(&self.root) {
            return Err(AppError::validation(format!(
                "Blob key outside uploads directory: {path}"
            )));
        }
        Ok(candidate)
    }

    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

/// Final component of an uploaded filename, or `None` if it has none.
fn sanitize_filename(filename: &str) -> Option<&str> {
    let name = Path::new(filename).file_name()?.to_str()?;
    let name = name.rsplit('\\').next().unwrap_or(name);
    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name)
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    fn upload_path(&self, owner: Uuid, filename: &str) -> AppResult<String> {
        let name = sanitize_filename(filename)
            .ok_or_else(|| AppError::validation(format!("Invalid file name: '{filename}'")))?;
        Ok(self
            .root
            .join(owner.to_string())
            .join(name)
            .to_string_lossy()
            .into_owned())
    }

    async fn save(&self, path: &str, data: Bytes) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        self.ensure_parent(&full_path).await?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full_path)
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    AppError::name_conflict()
                } else {
                    AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to create file: {path}"),
                        e,
                    )
                }
            })?;

        file.write_all(&data).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, format!("Failed to write file: {path}"), e)
        })?;
        file.flush()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to flush file", e))?;

        debug!(path, bytes = data.len(), "Stored blob");
        Ok(())
    }

    async fn read(&self, path: &str) -> AppResult<ByteStream> {
        let full_path = self.resolve(path)?;
        let file = fs::File::open(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::blob_missing()
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to open file: {path}"),
                    e,
                )
            }
        })?;

        let stream = ReaderStream::new(file);
        Ok(Box::pin(stream.map(|r| r.map(Bytes::from))))
    }

    async fn remove(&self, path: &str) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        match fs::remove_file(&full_path).await {
            Ok(()) => {
                debug!(path, "Removed blob");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete file: {path}"),
                e,
            )),
        }
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        let full_path = self.resolve(path)?;
        fs::try_exists(&full_path).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, format!("Failed to stat file: {path}"), e)
        })
    }
}
