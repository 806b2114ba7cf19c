//! Unified application error types for DocVault.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The named constructors at the bottom
//! of the `impl` block carry the stable, user-visible reasons the HTTP layer
//! reports back to callers.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found, or the caller may not see it.
    NotFound,
    /// A uniqueness rule was violated (login taken, file path collision).
    Conflict,
    /// Missing, malformed or expired credentials, or a wrong admin token.
    Unauthorized,
    /// Input validation failed.
    Validation,
    /// An internal server error occurred.
    Internal,
    /// A database error occurred.
    Database,
    /// A blob storage I/O error occurred.
    Storage,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
}

impl ErrorKind {
    /// Whether this kind is an infrastructure failure that callers only ever
    /// see as a generic internal error.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Internal
                | Self::Database
                | Self::Storage
                | Self::Configuration
                | Self::Serialization
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Unauthorized => write!(f, "UNAUTHORIZED"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Database => write!(f, "DATABASE"),
            Self::Storage => write!(f, "STORAGE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
        }
    }
}

/// The unified application error used throughout DocVault.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// No user matches the login, credentials, or session presented.
    ///
    /// Sign-in deliberately returns this for both an unknown login and a
    /// wrong password.
    pub fn user_not_found() -> Self {
        Self::not_found("user not found")
    }

    /// The document does not exist or is not visible to the caller.
    pub fn document_not_found() -> Self {
        Self::not_found("document not found")
    }

    /// The stored blob behind a file document is missing.
    pub fn blob_missing() -> Self {
        Self::not_found("file is damaged or not found")
    }

    /// The login is already registered.
    pub fn login_taken() -> Self {
        Self::conflict("login is busy")
    }

    /// A blob already exists at the generated upload path.
    pub fn name_conflict() -> Self {
        Self::conflict("file with this name already exists")
    }

    /// The registration admin token did not match.
    pub fn invalid_token() -> Self {
        Self::unauthorized("invalid token")
    }

    /// No usable bearer session accompanied the request.
    pub fn unauthenticated() -> Self {
        Self::unauthorized("user unauthorized")
    }

    /// The login does not satisfy the credential format rules.
    pub fn invalid_login() -> Self {
        Self::validation("invalid login")
    }

    /// The password does not satisfy the credential format rules.
    pub fn invalid_password() -> Self {
        Self::validation("invalid password")
    }

    /// The uploaded file exceeds the configured limit.
    pub fn file_too_large() -> Self {
        Self::validation("file is too large")
    }

    /// A document upload carried no name.
    pub fn name_is_empty() -> Self {
        Self::validation("name is empty")
    }

    /// A file document upload carried no `file` part.
    pub fn file_part_missing() -> Self {
        Self::validation("file not found")
    }

    /// The multipart upload form could not be read.
    pub fn invalid_meta_data() -> Self {
        Self::validation("invalid meta data")
    }

    /// Whether this error is of the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
