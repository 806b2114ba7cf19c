//! Document service: upload, listing, retrieval, existence check and
//! deletion, including the lifecycle of the blob behind file documents.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::traits::storage::{BlobStore, ByteStream};
use docvault_core::types::{DocumentFilter, ListParams};
use docvault_database::store::DocumentStore;
use docvault_entity::document::{Document, DocumentWithGrants, NewDocument};

use super::upload::{UploadDocument, UploadOutcome};
use crate::access::AccessResolver;
use crate::context::RequestContext;

/// Orchestrates document persistence and blob storage.
#[derive(Clone)]
pub struct DocumentService {
    /// Document and grant persistence.
    documents: Arc<dyn DocumentStore>,
    /// File contents.
    blobs: Arc<dyn BlobStore>,
    /// Listing scope resolution.
    access: Arc<AccessResolver>,
    /// Largest accepted file, in bytes.
    max_upload_bytes: u64,
}

impl std::fmt::Debug for DocumentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentService")
            .field("blobs", &self.blobs.provider_type())
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish_non_exhaustive()
    }
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        blobs: Arc<dyn BlobStore>,
        access: Arc<AccessResolver>,
        max_upload_bytes: u64,
    ) -> Self {
        Self {
            documents,
            blobs,
            access,
            max_upload_bytes,
        }
    }

    /// Creates a document owned by the caller.
    ///
    /// For file documents the blob is written first, at
    /// `{uploads_dir}/{user_id}/{filename}`; an existing blob at that key is
    /// a name conflict. If the document row cannot be created the blob is
    /// removed again.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        params: UploadDocument,
    ) -> Result<UploadOutcome, AppError> {
        if params.name.is_empty() {
            return Err(AppError::name_is_empty());
        }

        let mut file_path = String::new();
        let mut file_name = String::new();

        if params.is_file {
            let file = params.file.ok_or_else(AppError::file_part_missing)?;
            if file.data.len() as u64 > self.max_upload_bytes {
                return Err(AppError::file_too_large());
            }

            file_path = self.blobs.upload_path(ctx.user_id, &file.filename)?;
            if self.blobs.exists(&file_path).await? {
                return Err(AppError::name_conflict());
            }
            self.blobs.save(&file_path, file.data).await?;

            file_name = Path::new(&file_path)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
        }

        let new = NewDocument {
            owner_id: ctx.user_id,
            name: params.name,
            mime: params.mime,
            file_path,
            is_file: params.is_file,
            is_public: params.is_public,
            document_data: params.document_data,
            grantee_logins: params.grants,
        };

        let document = match self.documents.create(&new).await {
            Ok(document) => document,
            Err(e) => {
                if new.is_file {
                    self.discard_blob(&new.file_path).await;
                }
                return Err(e);
            }
        };

        info!(
            user_id = %ctx.user_id,
            document_id = %document.id,
            is_file = document.is_file,
            "Document uploaded"
        );

        Ok(UploadOutcome {
            document_data: new.document_data,
            file_name,
        })
    }

    /// Lists one page of documents.
    ///
    /// An empty `target_login` lists the caller's own documents; otherwise
    /// the documents of that user the caller may see.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        target_login: Option<&str>,
        filter: Option<&DocumentFilter>,
        params: ListParams,
    ) -> Result<Vec<DocumentWithGrants>, AppError> {
        let scope = self.access.listing_scope(ctx, target_login).await?;
        self.documents.list(scope, filter, params).await
    }

    /// Fetches a document the caller may see.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<DocumentWithGrants, AppError> {
        self.documents
            .find_visible(id, ctx.user_id)
            .await?
            .ok_or_else(AppError::document_not_found)
    }

    /// Opens the blob behind a file document.
    pub async fn open_file(&self, document: &Document) -> Result<ByteStream, AppError> {
        if !document.is_file || document.file_path.is_empty() {
            return Err(AppError::blob_missing());
        }
        self.blobs.read(&document.file_path).await
    }

    /// Succeeds if the caller may see the document.
    pub async fn check(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        if self.documents.exists_visible(id, ctx.user_id).await? {
            Ok(())
        } else {
            Err(AppError::document_not_found())
        }
    }

    /// Deletes a document the caller owns.
    ///
    /// Documents that do not exist and documents owned by someone else are
    /// both `document not found`. Blob removal happens after the row is gone
    /// and its failure does not undo the delete.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        let file_path = self
            .documents
            .delete_owned(id, ctx.user_id)
            .await?
            .ok_or_else(AppError::document_not_found)?;

        if !file_path.is_empty() {
            self.discard_blob(&file_path).await;
        }

        info!(user_id = %ctx.user_id, document_id = %id, "Document deleted");
        Ok(())
    }

    async fn discard_blob(&self, path: &str) {
        if let Err(e) = self.blobs.remove(path).await {
            warn!(path = %path, error = %e, "Failed to remove blob");
        }
    }
}
