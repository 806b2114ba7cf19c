//! Document repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_core::types::{DocumentFilter, ListParams, ListingScope};
use docvault_entity::document::{Document, DocumentWithGrants, NewDocument};

use super::listing::{EXISTS_VISIBLE_SQL, FIND_VISIBLE_SQL, listing_query};
use crate::store::DocumentStore;

/// Repository for documents and their access grants.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for DocumentRepository {
    async fn create(&self, new: &NewDocument) -> AppResult<Document> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let document = sqlx::query_as::<_, Document>(
            "INSERT INTO documents \
             (id, name, mime, file_path, is_file, is_public, document_data, owner_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id, name, mime, file_path, is_file, is_public, document_data, \
             owner_id, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&new.name)
        .bind(&new.mime)
        .bind(&new.file_path)
        .bind(new.is_file)
        .bind(new.is_public)
        .bind(&new.document_data)
        .bind(new.owner_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert document", e))?;

        sqlx::query("INSERT INTO access_grants (document_id, user_id) VALUES ($1, $2)")
            .bind(document.id)
            .bind(new.owner_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to insert owner grant", e)
            })?;

        for login in &new.grantee_logins {
            let inserted = sqlx::query(
                "INSERT INTO access_grants (document_id, user_id) \
                 SELECT $1, u.id FROM users u WHERE u.login = $2 AND u.id <> $3 \
                 ON CONFLICT DO NOTHING",
            )
            .bind(document.id)
            .bind(login)
            .bind(new.owner_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert grant", e))?;

            if inserted.rows_affected() == 0 {
                debug!(document_id = %document.id, login = %login, "Grantee skipped");
            }
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit document", e)
        })?;

        Ok(document)
    }

    async fn list(
        &self,
        scope: ListingScope,
        filter: Option<&DocumentFilter>,
        params: ListParams,
    ) -> AppResult<Vec<DocumentWithGrants>> {
        let mut qb = listing_query(scope, filter, params);
        qb.build_query_as::<DocumentWithGrants>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))
    }

    async fn find_visible(&self, id: Uuid, viewer: Uuid) -> AppResult<Option<DocumentWithGrants>> {
        sqlx::query_as::<_, DocumentWithGrants>(FIND_VISIBLE_SQL)
            .bind(id)
            .bind(viewer)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find document", e))
    }

    async fn exists_visible(&self, id: Uuid, viewer: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(EXISTS_VISIBLE_SQL)
            .bind(id)
            .bind(viewer)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check document", e))
    }

    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> AppResult<Option<String>> {
        sqlx::query_scalar::<_, String>(
            "DELETE FROM documents WHERE id = $1 AND owner_id = $2 RETURNING file_path",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete document", e))
    }
}
