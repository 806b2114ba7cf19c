//! Document use cases.

pub mod service;
pub mod upload;

pub use service::DocumentService;
pub use upload::{UploadDocument, UploadOutcome, UploadedFile};
