//! Upload storage configuration.

use serde::{Deserialize, Serialize};

/// Where uploaded document files are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory; blobs live at `{uploads_dir}/{user_id}/{filename}`.
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            uploads_dir: default_uploads_dir(),
        }
    }
}

fn default_uploads_dir() -> String {
    "./uploads".to_string()
}
