//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use docvault_auth::password::CredentialValidator;
use docvault_auth::session::SessionManager;
use docvault_core::config::AppConfig;
use docvault_service::document::DocumentService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Registration, sign-in, token resolution and logout
    pub session_manager: Arc<SessionManager>,
    /// Login and password format rules
    pub credential_validator: Arc<CredentialValidator>,
    /// Document use cases
    pub document_service: Arc<DocumentService>,
}
