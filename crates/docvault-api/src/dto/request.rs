//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use docvault_core::error::{AppError, ErrorKind};

/// Registration request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterRequest {
    /// Admin token gating registration.
    #[validate(length(min = 1, message = "invalid token"))]
    pub token: String,
    /// Desired login.
    pub login: String,
    /// Password.
    #[serde(rename = "pswd")]
    pub password: String,
}

/// Sign-in request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthRequest {
    /// Login.
    pub login: String,
    /// Password.
    #[serde(rename = "pswd")]
    pub password: String,
}

/// Listing selectors on `GET /api/docs`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentQuery {
    /// Whose documents to list; absent or empty means the caller's own.
    pub login: Option<String>,
    /// Filter column.
    pub key: Option<String>,
    /// Filter value.
    pub value: Option<String>,
}

/// Turn `validator` failures into a validation error carrying the first
/// field message.
pub fn validation_failure(errors: ValidationErrors) -> AppError {
    let message = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "invalid request".to_string());
    AppError::with_source(ErrorKind::Validation, message, errors)
}
