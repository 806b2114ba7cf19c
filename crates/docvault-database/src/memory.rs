//! In-memory store implementations.
//!
//! [`MemoryStore`] implements every store trait over one shared state so
//! the services and HTTP layer can run without PostgreSQL. Semantics match
//! the SQL repositories: exact-login lookups, strict `expires_at > now`
//! session checks, the same visibility predicate, and all-or-nothing
//! document creation.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_core::types::{DocumentFilter, ListParams, ListingScope};
use docvault_entity::document::{Document, DocumentWithGrants, NewDocument};
use docvault_entity::session::Session;
use docvault_entity::user::User;

use crate::store::{CredentialStore, DocumentStore, SessionStore};

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    sessions: HashMap<String, Session>,
    documents: Vec<Document>,
    /// `(document_id, user_id)` edges.
    grants: Vec<(Uuid, Uuid)>,
    last_created_at: Option<DateTime<Utc>>,
}

impl State {
    fn has_grant(&self, document: Uuid, user: Uuid) -> bool {
        self.grants.contains(&(document, user))
    }

    fn grant_logins(&self, document: Uuid) -> Vec<String> {
        let mut logins: Vec<String> = self
            .grants
            .iter()
            .filter(|(doc, _)| *doc == document)
            .filter_map(|(_, user)| self.users.iter().find(|u| u.id == *user))
            .map(|u| u.login.clone())
            .collect();
        logins.sort();
        logins
    }

    fn with_grants(&self, document: &Document) -> DocumentWithGrants {
        DocumentWithGrants {
            document: document.clone(),
            grants: self.grant_logins(document.id),
        }
    }

    /// Strictly increasing creation timestamps, so listings have a total
    /// order even when the clock does not advance between inserts.
    fn next_created_at(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let at = match self.last_created_at {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_created_at = Some(at);
        at
    }
}

/// Shared in-process store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<State>>,
    fail_grant_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next [`DocumentStore::create`] that names a resolvable
    /// grantee fail while writing that grant, after the document row and
    /// the owner grant are already in place.
    pub fn fail_next_grant_write(&self) {
        self.fail_grant_writes.store(true, Ordering::SeqCst);
    }

    /// Number of document rows.
    pub async fn document_count(&self) -> usize {
        self.state.read().await.documents.len()
    }

    /// Number of grant rows.
    pub async fn grant_count(&self) -> usize {
        self.state.read().await.grants.len()
    }

    /// Number of session rows, expired ones included.
    pub async fn session_count(&self) -> usize {
        self.state.read().await.sessions.len()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn create(&self, login: &str, password_hash: &str) -> AppResult<User> {
        let mut state = self.state.write().await;
        if state.users.iter().any(|u| u.login == login) {
            return Err(AppError::login_taken());
        }
        let user = User {
            id: Uuid::new_v4(),
            login: login.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.login == login).cloned())
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn insert(&self, session: &Session) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state.sessions.contains_key(&session.token) {
            return Err(AppError::database("Duplicate session token"));
        }
        state
            .sessions
            .insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn find_active(&self, token: &str, now: DateTime<Utc>) -> AppResult<Option<Session>> {
        let state = self.state.read().await;
        Ok(state
            .sessions
            .get(token)
            .filter(|s| s.is_active_at(now))
            .cloned())
    }

    async fn delete(&self, token: &str) -> AppResult<()> {
        self.state.write().await.sessions.remove(token);
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(&self, new: &NewDocument) -> AppResult<Document> {
        let mut state = self.state.write().await;
        let documents_before = state.documents.len();
        let grants_before = state.grants.len();

        let document = Document {
            id: Uuid::new_v4(),
            name: new.name.clone(),
            mime: new.mime.clone(),
            file_path: new.file_path.clone(),
            is_file: new.is_file,
            is_public: new.is_public,
            document_data: new.document_data.clone(),
            owner_id: new.owner_id,
            created_at: state.next_created_at(),
        };
        state.documents.push(document.clone());
        state.grants.push((document.id, new.owner_id));

        let grantees: Vec<Uuid> = new
            .grantee_logins
            .iter()
            .filter_map(|login| {
                state
                    .users
                    .iter()
                    .find(|u| &u.login == login && u.id != new.owner_id)
                    .map(|u| u.id)
            })
            .collect();

        for user_id in grantees {
            if self.fail_grant_writes.swap(false, Ordering::SeqCst) {
                // Roll back the document row and every grant written so far.
                state.documents.truncate(documents_before);
                state.grants.truncate(grants_before);
                return Err(AppError::database("Failed to insert grant"));
            }
            if !state.has_grant(document.id, user_id) {
                state.grants.push((document.id, user_id));
            }
        }

        Ok(document)
    }

    async fn list(
        &self,
        scope: ListingScope,
        filter: Option<&DocumentFilter>,
        params: ListParams,
    ) -> AppResult<Vec<DocumentWithGrants>> {
        let state = self.state.read().await;

        let mut matching: Vec<&Document> = state
            .documents
            .iter()
            .filter(|d| d.owner_id == scope.owner())
            .filter(|d| match scope {
                ListingScope::Owned { .. } => true,
                ListingScope::SharedBy { viewer, .. } => {
                    d.is_public || state.has_grant(d.id, viewer)
                }
            })
            .filter(|d| filter.is_none_or(|f| f.matches(&d.field_text(f.field))))
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(matching
            .into_iter()
            .skip(params.offset() as usize)
            .take(params.limit() as usize)
            .map(|d| state.with_grants(d))
            .collect())
    }

    async fn find_visible(&self, id: Uuid, viewer: Uuid) -> AppResult<Option<DocumentWithGrants>> {
        let state = self.state.read().await;
        Ok(state
            .documents
            .iter()
            .find(|d| d.id == id && d.is_visible_to(viewer, state.has_grant(d.id, viewer)))
            .map(|d| state.with_grants(d)))
    }

    async fn exists_visible(&self, id: Uuid, viewer: Uuid) -> AppResult<bool> {
        Ok(self.find_visible(id, viewer).await?.is_some())
    }

    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> AppResult<Option<String>> {
        let mut state = self.state.write().await;
        let Some(pos) = state
            .documents
            .iter()
            .position(|d| d.id == id && d.owner_id == owner)
        else {
            return Ok(None);
        };
        let removed = state.documents.remove(pos);
        state.grants.retain(|(doc, _)| *doc != id);
        Ok(Some(removed.file_path))
    }
}
