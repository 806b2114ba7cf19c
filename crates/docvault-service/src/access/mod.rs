//! Listing scope resolution.

pub mod resolver;

pub use resolver::AccessResolver;
