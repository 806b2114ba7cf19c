//! Core type definitions used across the DocVault workspace.

pub mod filter;
pub mod listing;
pub mod pagination;

pub use filter::{DocumentField, DocumentFilter};
pub use listing::ListingScope;
pub use pagination::ListParams;
