//! # docvault-core
//!
//! Core crate for DocVault. Contains the unified error system, configuration
//! schemas, the blob storage trait, and the listing types (filter allowlist,
//! pagination, listing scope) shared by every other crate.
//!
//! This crate has **no** internal dependencies on other DocVault crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
