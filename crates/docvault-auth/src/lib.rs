//! # docvault-auth
//!
//! Identity for DocVault.
//!
//! ## Modules
//!
//! - `password`: Argon2id hashing and credential format rules
//! - `jwt`: signing and verifying session tokens
//! - `session`: the session manager: sign-up, sign-in, token resolution, logout

pub mod jwt;
pub mod password;
pub mod session;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{CredentialValidator, PasswordHasher};
pub use session::SessionManager;
