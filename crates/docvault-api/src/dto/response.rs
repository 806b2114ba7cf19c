//! Response DTOs and the envelope every JSON body uses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use docvault_entity::document::DocumentWithGrants;

/// Standard response envelope.
///
/// Exactly the members that carry something are serialized, so a success
/// with nothing to report is `{}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Set on failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
    /// Result of an action (registration, sign-in, deletion).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<T>,
    /// Requested data (documents, upload results).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Envelope carrying `response`.
    pub fn response(response: T) -> Self {
        Self {
            error: None,
            response: Some(response),
            data: None,
        }
    }

    /// Envelope carrying `data`.
    pub fn data(data: T) -> Self {
        Self {
            error: None,
            response: None,
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Envelope with no members.
    pub fn empty() -> Self {
        Self {
            error: None,
            response: None,
            data: None,
        }
    }

    /// Envelope carrying an error.
    pub fn error(code: u16, text: impl Into<String>) -> Self {
        Self {
            error: Some(ErrorBody {
                code,
                text: text.into(),
            }),
            response: None,
            data: None,
        }
    }
}

/// Error member of the envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// HTTP status code.
    pub code: u16,
    /// Stable, user-facing reason.
    pub text: String,
}

/// Successful registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// The registered login.
    pub login: String,
}

/// Successful sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
}

/// One page of a document listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentList {
    /// Documents in creation order.
    pub docs: Vec<DocumentWithGrants>,
}

/// `{ "<key>": true }` acknowledgement used by logout and delete.
pub fn acknowledged(key: &str) -> BTreeMap<String, bool> {
    BTreeMap::from([(key.to_string(), true)])
}
