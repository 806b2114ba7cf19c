//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A bearer token bound to a user until `expires_at`.
///
/// Sessions are created on sign-in and deleted on logout. Expired rows are
/// never purged eagerly; lookups simply stop returning them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// The opaque bearer token.
    pub token: String,
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// Instant after which the session no longer resolves.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session resolves at `now`.
    ///
    /// Valid for every `now < expires_at`, invalid from `expires_at` on.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}
