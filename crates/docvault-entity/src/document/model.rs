//! Document entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use docvault_core::types::DocumentField;

/// A stored document.
///
/// Documents are immutable after creation; the only mutation is deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Document {
    /// Unique document identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// MIME type supplied by the uploader.
    pub mime: String,
    /// Blob key; empty unless `is_file`.
    #[serde(skip)]
    pub file_path: String,
    /// Whether a blob backs this document.
    pub is_file: bool,
    /// Visible to every authenticated user.
    #[serde(rename = "public")]
    pub is_public: bool,
    /// Opaque payload supplied at upload.
    #[serde(rename = "json", skip_serializing_if = "String::is_empty", default)]
    pub document_data: String,
    /// Owning user.
    #[serde(skip)]
    pub owner_id: Uuid,
    /// Creation time; listings are ordered by it.
    #[serde(rename = "created")]
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// The visibility predicate: `viewer` may see this document if they own
    /// it, it is public, or they hold a grant on it.
    pub fn is_visible_to(&self, viewer: Uuid, has_grant: bool) -> bool {
        self.owner_id == viewer || self.is_public || has_grant
    }

    /// Text form of a filterable column, as the filter matches against it.
    pub fn field_text(&self, field: DocumentField) -> String {
        match field {
            DocumentField::Name => self.name.clone(),
            DocumentField::Mime => self.mime.clone(),
            DocumentField::FilePath => self.file_path.clone(),
            DocumentField::IsFile => self.is_file.to_string(),
            DocumentField::IsPublic => self.is_public.to_string(),
            DocumentField::DocumentData => self.document_data.clone(),
            DocumentField::CreatedAt => timestamptz_text(self.created_at),
        }
    }
}

/// `timestamptz::text` as PostgreSQL renders it with `TimeZone = 'UTC'`:
/// microseconds with trailing zeros trimmed, no fraction at all when zero.
fn timestamptz_text(at: DateTime<Utc>) -> String {
    let mut text = at.format("%Y-%m-%d %H:%M:%S").to_string();
    let micros = at.timestamp_subsec_micros();
    if micros > 0 {
        let fraction = format!("{micros:06}");
        text.push('.');
        text.push_str(fraction.trim_end_matches('0'));
    }
    text.push_str("+00");
    text
}

/// A document together with the logins of every user holding a grant on it,
/// the owner included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DocumentWithGrants {
    /// The document row.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub document: Document,
    /// Grantee logins, sorted.
    pub grants: Vec<String>,
}

/// Input for creating a document.
#[derive(Debug, Clone)]
pub struct NewDocument {
    /// Owning user; also receives an implicit grant.
    pub owner_id: Uuid,
    /// Display name.
    pub name: String,
    /// MIME type.
    pub mime: String,
    /// Blob key, or empty when `is_file` is false.
    pub file_path: String,
    /// Whether a blob backs this document.
    pub is_file: bool,
    /// Visible to every authenticated user.
    pub is_public: bool,
    /// Opaque payload.
    pub document_data: String,
    /// Logins to grant access to. Unknown logins and the owner's own login
    /// are skipped.
    pub grantee_logins: Vec<String>,
}
