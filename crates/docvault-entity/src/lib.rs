//! # docvault-entity
//!
//! Domain entity models for DocVault. Every struct in this crate represents
//! a database table row or a value object passed to a store. Row types
//! derive `sqlx::FromRow` in addition to the serde traits.

pub mod document;
pub mod session;
pub mod user;
