//! Application builder: wires stores, services and the router into an
//! Axum app.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use tower_http::trace::TraceLayer;
use tracing::info;

use docvault_auth::jwt::{JwtDecoder, JwtEncoder};
use docvault_auth::password::{CredentialValidator, PasswordHasher};
use docvault_auth::session::SessionManager;
use docvault_core::config::AppConfig;
use docvault_core::error::AppError;
use docvault_core::traits::storage::BlobStore;
use docvault_database::repositories::{DocumentRepository, SessionRepository, UserRepository};
use docvault_database::store::{CredentialStore, DocumentStore, SessionStore};
use docvault_service::access::AccessResolver;
use docvault_service::document::DocumentService;
use docvault_storage::LocalBlobStore;

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// The persistence backends a running app is built on.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Users and password hashes.
    pub credentials: Arc<dyn CredentialStore>,
    /// Sessions.
    pub sessions: Arc<dyn SessionStore>,
    /// Documents and grants.
    pub documents: Arc<dyn DocumentStore>,
    /// Uploaded file contents.
    pub blobs: Arc<dyn BlobStore>,
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Builds the state for a PostgreSQL-backed deployment.
pub async fn build_state(config: AppConfig, pool: PgPool) -> Result<AppState, AppError> {
    let blobs = LocalBlobStore::new(&config.storage.uploads_dir).await?;
    info!(uploads_dir = %config.storage.uploads_dir, "Blob storage ready");

    let stores = Stores {
        credentials: Arc::new(UserRepository::new(pool.clone())),
        sessions: Arc::new(SessionRepository::new(pool.clone())),
        documents: Arc::new(DocumentRepository::new(pool)),
        blobs: Arc::new(blobs),
    };
    assemble_state(config, stores)
}

/// Wires services over the given stores.
pub fn assemble_state(config: AppConfig, stores: Stores) -> Result<AppState, AppError> {
    let session_manager = SessionManager::new(
        stores.credentials.clone(),
        stores.sessions,
        Arc::new(PasswordHasher::new()),
        Arc::new(JwtEncoder::new(&config.auth)),
        Arc::new(JwtDecoder::new(&config.auth)),
        &config.auth,
    )?;

    let access = Arc::new(AccessResolver::new(stores.credentials));
    let document_service = DocumentService::new(
        stores.documents,
        stores.blobs,
        access,
        config.server.max_upload_bytes(),
    );

    Ok(AppState {
        config: Arc::new(config),
        session_manager: Arc::new(session_manager),
        credential_validator: Arc::new(CredentialValidator::new()),
        document_service: Arc::new(document_service),
    })
}
