//! Blob store provider implementations.

pub mod local;

pub use local::LocalBlobStore;
