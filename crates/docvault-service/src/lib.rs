//! # docvault-service
//!
//! Business logic service layer for DocVault. Services orchestrate the
//! store traits and the blob store to implement application-level use
//! cases: resolving whose documents a listing covers, and the document
//! upload / list / get / check / delete flows.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod access;
pub mod context;
pub mod document;

pub use access::AccessResolver;
pub use context::RequestContext;
pub use document::{DocumentService, UploadDocument, UploadOutcome, UploadedFile};
