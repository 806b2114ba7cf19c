//! PostgreSQL implementations of the store traits.

pub mod document;
pub mod listing;
pub mod session;
pub mod user;

pub use document::DocumentRepository;
pub use session::SessionRepository;
pub use user::UserRepository;
