//! # docvault-storage
//!
//! Blob storage for document files. The local filesystem provider keeps each
//! upload at `{uploads_dir}/{user_id}/{filename}`.

pub mod providers;

pub use providers::LocalBlobStore;
