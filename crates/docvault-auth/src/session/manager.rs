//! Session lifecycle manager: registration, sign-in, token resolution, logout.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use docvault_core::config::AuthConfig;
use docvault_core::error::AppError;
use docvault_database::store::{CredentialStore, SessionStore};
use docvault_entity::session::Session;
use docvault_entity::user::User;

use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;

/// Verified against when a login is unknown, so both sign-in failures do
/// the same amount of hashing work.
const TIMING_DECOY_PASSWORD: &str = "docvault-timing-decoy";

/// Issues, resolves and revokes bearer sessions.
#[derive(Clone)]
pub struct SessionManager {
    /// Credential persistence.
    credentials: Arc<dyn CredentialStore>,
    /// Session persistence.
    sessions: Arc<dyn SessionStore>,
    /// Password hasher.
    password_hasher: Arc<PasswordHasher>,
    /// Token signer.
    jwt_encoder: Arc<JwtEncoder>,
    /// Token verifier.
    jwt_decoder: Arc<JwtDecoder>,
    /// Registration gate secret.
    admin_token: String,
    /// Lifetime of each issued session.
    session_ttl: Duration,
    /// Hash of [`TIMING_DECOY_PASSWORD`].
    decoy_hash: String,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("session_ttl", &self.session_ttl)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        sessions: Arc<dyn SessionStore>,
        password_hasher: Arc<PasswordHasher>,
        jwt_encoder: Arc<JwtEncoder>,
        jwt_decoder: Arc<JwtDecoder>,
        config: &AuthConfig,
    ) -> Result<Self, AppError> {
        let session_ttl = i64::try_from(config.session_ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| AppError::configuration("auth.session_ttl_seconds is out of range"))?;
        let decoy_hash = password_hasher.hash_password(TIMING_DECOY_PASSWORD)?;

        Ok(Self {
            credentials,
            sessions,
            password_hasher,
            jwt_encoder,
            jwt_decoder,
            admin_token: config.admin_token.clone(),
            session_ttl,
            decoy_hash,
        })
    }

    /// Registers a new user.
    ///
    /// Fails with `Unauthorized` when `admin_token` does not match the
    /// configured secret, and with `Conflict` when the login is taken.
    /// Registration does not start a session.
    pub async fn sign_up(
        &self,
        admin_token: &str,
        login: &str,
        password: &str,
    ) -> Result<User, AppError> {
        if !constant_time_eq(admin_token.as_bytes(), self.admin_token.as_bytes()) {
            warn!(login = %login, "Registration rejected: wrong admin token");
            return Err(AppError::invalid_token());
        }

        let hash = self.password_hasher.hash_password(password)?;
        let user = self.credentials.create(login, &hash).await?;

        info!(user_id = %user.id, login = %user.login, "User registered");
        Ok(user)
    }

    /// Authenticates `login`/`password` and opens a session.
    ///
    /// An unknown login and a wrong password both fail with the same
    /// `user not found` error.
    pub async fn sign_in(&self, login: &str, password: &str) -> Result<Session, AppError> {
        let user = self.credentials.find_by_login(login).await?;

        let (user, stored_hash) = match user {
            Some(user) => {
                let hash = user.password_hash.clone();
                (Some(user), hash)
            }
            None => (None, self.decoy_hash.clone()),
        };

        let password_valid = self
            .password_hasher
            .verify_password(password, &stored_hash)?;

        let user = match user {
            Some(user) if password_valid => user,
            _ => {
                debug!(login = %login, "Sign-in rejected");
                return Err(AppError::user_not_found());
            }
        };

        let now = Utc::now();
        let (token, expires_at) = self.jwt_encoder.issue(user.id, now, self.session_ttl)?;
        let session = Session {
            token,
            user_id: user.id,
            expires_at,
        };
        self.sessions.insert(&session).await?;

        info!(user_id = %user.id, expires_at = %expires_at, "Session opened");
        Ok(session)
    }

    /// Resolves a bearer token to its user at the current time.
    pub async fn resolve_token(&self, token: &str) -> Result<Uuid, AppError> {
        self.resolve_token_at(token, Utc::now()).await
    }

    /// Resolves a bearer token to its user as of `now`.
    ///
    /// Fails with `user not found` when the token is not correctly signed,
    /// has no session row, or its session expired at or before `now`.
    pub async fn resolve_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<Uuid, AppError> {
        let claims = self.jwt_decoder.decode(token).map_err(|e| {
            debug!(error = %e, "Rejected bearer token");
            AppError::user_not_found()
        })?;

        let session = self
            .sessions
            .find_active(token, now)
            .await?
            .ok_or_else(AppError::user_not_found)?;

        if session.user_id != claims.user_id() {
            warn!(
                session_user = %session.user_id,
                claimed_user = %claims.user_id(),
                "Session owner does not match token subject"
            );
            return Err(AppError::user_not_found());
        }

        Ok(session.user_id)
    }

    /// Deletes the session for `token`. Unknown tokens are not an error.
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        self.sessions.delete(token).await?;
        debug!("Session closed");
        Ok(())
    }
}

/// Byte comparison whose running time does not depend on where the inputs
/// first differ.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
