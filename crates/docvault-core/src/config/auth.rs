//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Registration gate and session token configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret that must accompany every registration request.
    #[serde(default)]
    pub admin_token: String,
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default)]
    pub jwt_secret: String,
    /// Lifetime of a session token in seconds.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_seconds: u64,
}

fn default_session_ttl() -> u64 {
    86_400
}
