//! Capability traits for persistence.
//!
//! One trait per responsibility: credentials, sessions, and documents with
//! their grants. Services receive them as `Arc<dyn ...>` through their
//! constructors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use docvault_core::result::AppResult;
use docvault_core::types::{DocumentFilter, ListParams, ListingScope};
use docvault_entity::document::{Document, DocumentWithGrants, NewDocument};
use docvault_entity::session::Session;
use docvault_entity::user::User;

/// Login → password-hash storage.
#[async_trait]
pub trait CredentialStore: Send + Sync + std::fmt::Debug + 'static {
    /// Register a new user. Fails with a conflict (`login is busy`) if the
    /// login already exists.
    async fn create(&self, login: &str, password_hash: &str) -> AppResult<User>;

    /// Look up a user by exact login.
    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>>;
}

/// Token → (user, expiry) storage.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Persist a new session.
    async fn insert(&self, session: &Session) -> AppResult<()>;

    /// Return the session for `token` only if it is still active at `now`.
    async fn find_active(&self, token: &str, now: DateTime<Utc>) -> AppResult<Option<Session>>;

    /// Delete the session for `token`. Deleting an unknown token succeeds.
    async fn delete(&self, token: &str) -> AppResult<()>;
}

/// Documents and their access grants.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Atomically insert the document, the owner's grant, and a grant for
    /// every resolvable grantee login.
    async fn create(&self, document: &NewDocument) -> AppResult<Document>;

    /// One page of the listing described by `scope`, oldest first.
    async fn list(
        &self,
        scope: ListingScope,
        filter: Option<&DocumentFilter>,
        params: ListParams,
    ) -> AppResult<Vec<DocumentWithGrants>>;

    /// The document, if it exists and is visible to `viewer`.
    async fn find_visible(&self, id: Uuid, viewer: Uuid) -> AppResult<Option<DocumentWithGrants>>;

    /// Whether the document exists and is visible to `viewer`.
    async fn exists_visible(&self, id: Uuid, viewer: Uuid) -> AppResult<bool>;

    /// Delete the document if `owner` owns it, returning its blob key.
    ///
    /// `None` covers both a missing document and one owned by someone else.
    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> AppResult<Option<String>>;
}
