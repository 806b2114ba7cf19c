//! `AuthUser` extractor: pulls the bearer token from the Authorization
//! header and resolves it to a user through the session manager.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::debug;

use docvault_core::error::{AppError, ErrorKind};
use docvault_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The token from a `Bearer <token>` header value.
fn bearer_token(header: &str) -> Option<&str> {
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Some(token),
        _ => None,
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(|| {
                debug!("Missing or malformed Authorization header");
                AppError::unauthenticated()
            })?;

        let user_id = state
            .session_manager
            .resolve_token(token)
            .await
            .map_err(|e| {
                if e.is(ErrorKind::NotFound) {
                    AppError::unauthenticated()
                } else {
                    e
                }
            })?;

        Ok(AuthUser(RequestContext::new(user_id)))
    }
}
