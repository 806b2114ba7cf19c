//! Core traits defined in `docvault-core` and implemented by other crates.

pub mod storage;

pub use storage::{BlobStore, ByteStream};
