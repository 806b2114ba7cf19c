//! # docvault-database
//!
//! Persistence for DocVault: the store traits the rest of the workspace
//! programs against, their PostgreSQL implementations, the connection pool,
//! and embedded migrations. The `memory` feature adds in-process
//! implementations of the same traits.

pub mod connection;
#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{CredentialStore, DocumentStore, SessionStore};
