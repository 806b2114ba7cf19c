//! `UploadForm` extractor: reads a multipart document upload.
//!
//! Recognized parts: `name`, `mime`, `json`, `is_file`, `public`, `grant`
//! (or `grant[]`, repeatable) and `file`. Unknown parts are skipped.

use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::StatusCode;

use docvault_core::error::{AppError, ErrorKind};
use docvault_service::document::{UploadDocument, UploadedFile};

use crate::error::ApiError;

/// A parsed upload, ready for the document service.
#[derive(Debug, Clone)]
pub struct UploadForm(pub UploadDocument);

impl<S> FromRequest<S> for UploadForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state).await.map_err(|e| {
            AppError::with_source(ErrorKind::Validation, "invalid meta data", e)
        })?;

        let mut form = UploadDocument::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(part) = field.name().map(str::to_owned) else {
                continue;
            };

            match part.as_str() {
                "name" => form.name = field.text().await.map_err(multipart_error)?,
                "mime" => form.mime = field.text().await.map_err(multipart_error)?,
                "json" => form.document_data = field.text().await.map_err(multipart_error)?,
                "is_file" => {
                    form.is_file = parse_form_bool(&field.text().await.map_err(multipart_error)?)?
                }
                "public" => {
                    form.is_public =
                        parse_form_bool(&field.text().await.map_err(multipart_error)?)?
                }
                "grant" | "grant[]" => {
                    let login = field.text().await.map_err(multipart_error)?;
                    if !login.is_empty() {
                        form.grants.push(login);
                    }
                }
                "file" => {
                    let filename = field.file_name().unwrap_or_default().to_owned();
                    let data = field.bytes().await.map_err(multipart_error)?;
                    form.file = Some(UploadedFile { filename, data });
                }
                _ => {}
            }
        }

        Ok(UploadForm(form))
    }
}

/// A body over the request limit is reported as an oversized file;
/// anything else as an unreadable form.
fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::file_too_large()
    } else {
        AppError::with_source(ErrorKind::Validation, "invalid meta data", e)
    }
}

/// Form booleans: empty is false, otherwise one of the usual spellings.
fn parse_form_bool(raw: &str) -> Result<bool, AppError> {
    match raw.trim() {
        "" | "0" | "f" | "F" | "false" | "False" | "FALSE" => Ok(false),
        "1" | "t" | "T" | "true" | "True" | "TRUE" => Ok(true),
        _ => Err(AppError::invalid_meta_data()),
    }
}
