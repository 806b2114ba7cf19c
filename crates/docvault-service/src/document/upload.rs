//! Upload request and result types.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A file part received with an upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied file name; only its final component is used.
    pub filename: String,
    /// File contents.
    pub data: Bytes,
}

/// Parameters for creating a document.
#[derive(Debug, Clone, Default)]
pub struct UploadDocument {
    /// Display name. Required.
    pub name: String,
    /// MIME type, served back as the content type of file documents.
    pub mime: String,
    /// Whether the document is backed by `file`.
    pub is_file: bool,
    /// Visible to every authenticated user.
    pub is_public: bool,
    /// Opaque payload.
    pub document_data: String,
    /// Logins to grant access to.
    pub grants: Vec<String>,
    /// File part; required when `is_file`, ignored otherwise.
    pub file: Option<UploadedFile>,
}

/// What an upload reports back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadOutcome {
    /// The payload as it was supplied.
    #[serde(rename = "json")]
    pub document_data: String,
    /// Stored file name, or empty for non-file documents.
    #[serde(rename = "file")]
    pub file_name: String,
}
