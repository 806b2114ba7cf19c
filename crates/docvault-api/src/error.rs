//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use docvault_core::error::{AppError, ErrorKind};

use crate::dto::response::ApiResponse;

/// Text reported for every 5xx response.
pub const INTERNAL_ERROR_TEXT: &str = "internal server error";

/// An [`AppError`] on its way to becoming an HTTP response.
///
/// The status follows from the error kind unless a handler overrides it
/// for a route whose contract maps that kind differently.
#[derive(Debug)]
pub struct ApiError {
    /// The underlying error.
    pub error: AppError,
    /// Route-specific status, if any.
    status: Option<StatusCode>,
}

impl ApiError {
    /// Default status for an error kind.
    pub fn status_for(kind: ErrorKind) -> StatusCode {
        match kind {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict | ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Internal
            | ErrorKind::Database
            | ErrorKind::Storage
            | ErrorKind::Configuration
            | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Use `status` instead of the default when the error is of `kind`.
    pub fn status_if(mut self, kind: ErrorKind, status: StatusCode) -> Self {
        if self.error.is(kind) {
            self.status = Some(status);
        }
        self
    }

    /// The status this error will be reported with.
    pub fn status(&self) -> StatusCode {
        self.status
            .unwrap_or_else(|| Self::status_for(self.error.kind))
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self {
            error,
            status: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let text = if status.is_server_error() {
            error!(
                status = status.as_u16(),
                kind = %self.error.kind,
                error = %self.error,
                source = ?self.error.source,
                "Request failed"
            );
            INTERNAL_ERROR_TEXT.to_string()
        } else {
            warn!(status = status.as_u16(), error = %self.error, "Request rejected");
            self.error.message
        };

        (status, Json(ApiResponse::<()>::error(status.as_u16(), text))).into_response()
    }
}
