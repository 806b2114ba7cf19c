//! Decides which documents a listing covers.

use std::sync::Arc;

use tracing::debug;

use docvault_core::error::AppError;
use docvault_core::types::ListingScope;
use docvault_database::store::CredentialStore;

use crate::context::RequestContext;

/// Turns a listing request into a [`ListingScope`].
#[derive(Debug, Clone)]
pub struct AccessResolver {
    /// Used to resolve the target login of an other-user listing.
    credentials: Arc<dyn CredentialStore>,
}

impl AccessResolver {
    /// Creates a new access resolver.
    pub fn new(credentials: Arc<dyn CredentialStore>) -> Self {
        Self { credentials }
    }

    /// Scope for listing `target_login`'s documents on behalf of the caller.
    ///
    /// An absent or empty login lists the caller's own documents. Otherwise
    /// the login must name an existing user (`user not found` if not), and
    /// the listing is restricted to that user's documents the caller may
    /// see. Naming oneself goes through the same restricted path, which
    /// still yields every owned document.
    pub async fn listing_scope(
        &self,
        ctx: &RequestContext,
        target_login: Option<&str>,
    ) -> Result<ListingScope, AppError> {
        let Some(login) = target_login.filter(|l| !l.is_empty()) else {
            return Ok(ListingScope::Owned { owner: ctx.user_id });
        };

        let target = self
            .credentials
            .find_by_login(login)
            .await?
            .ok_or_else(|| {
                debug!(login = %login, "Listing target does not exist");
                AppError::user_not_found()
            })?;

        Ok(ListingScope::SharedBy {
            owner: target.id,
            viewer: ctx.user_id,
        })
    }
}
