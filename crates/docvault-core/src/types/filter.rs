//! The document filter allowlist.
//!
//! Listing filters name a column by key. Only the keys in
//! [`DocumentField::ALL`] are honoured; every other key is dropped before a
//! query is built, so user input never selects a column name directly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A filterable document column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentField {
    /// `name`
    Name,
    /// `mime`
    Mime,
    /// `file_path`
    FilePath,
    /// `is_file`
    IsFile,
    /// `is_public`
    IsPublic,
    /// `document_data`
    DocumentData,
    /// `created_at`
    CreatedAt,
}

impl DocumentField {
    /// Every allowlisted field.
    pub const ALL: [DocumentField; 7] = [
        Self::Name,
        Self::Mime,
        Self::FilePath,
        Self::IsFile,
        Self::IsPublic,
        Self::DocumentData,
        Self::CreatedAt,
    ];

    /// Filter key as accepted from callers.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Mime => "mime",
            Self::FilePath => "file_path",
            Self::IsFile => "is_file",
            Self::IsPublic => "is_public",
            Self::DocumentData => "document_data",
            Self::CreatedAt => "created_at",
        }
    }

    /// Qualified column the field maps to in listing queries.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Name => "d.name",
            Self::Mime => "d.mime",
            Self::FilePath => "d.file_path",
            Self::IsFile => "d.is_file",
            Self::IsPublic => "d.is_public",
            Self::DocumentData => "d.document_data",
            Self::CreatedAt => "d.created_at",
        }
    }
}

impl fmt::Display for DocumentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DocumentField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.key() == s)
            .ok_or_else(|| AppError::validation(format!("Unknown document field: '{s}'")))
    }
}

/// A single-field, case-sensitive substring filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFilter {
    /// Column to match.
    pub field: DocumentField,
    /// Substring the column's text form must contain.
    pub value: String,
}

impl DocumentFilter {
    /// Build a filter from raw `key`/`value` query parameters.
    ///
    /// Returns `None` when either part is missing or empty, or when the key
    /// is not on the allowlist. An unknown key is not an error.
    pub fn parse(key: Option<&str>, value: Option<&str>) -> Option<Self> {
        let key = key.filter(|k| !k.is_empty())?;
        let value = value.filter(|v| !v.is_empty())?;
        let field = key.parse::<DocumentField>().ok()?;
        Some(Self {
            field,
            value: value.to_string(),
        })
    }

    /// Whether `text` (the column's text form) satisfies the filter.
    pub fn matches(&self, text: &str) -> bool {
        text.contains(self.value.as_str())
    }

    /// `LIKE` pattern matching `value` literally anywhere in the column.
    ///
    /// `\`, `%` and `_` in the value are escaped with `\`, which is the
    /// PostgreSQL default `LIKE` escape character.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.value.len() + 2);
        pattern.push('%');
        for c in self.value.chars() {
            if matches!(c, '\\' | '%' | '_') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}
