//! Listing scopes: whose documents a listing covers, and for whom.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The two listing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingScope {
    /// Every document owned by the caller, regardless of grants or the
    /// public flag.
    Owned {
        /// The caller.
        owner: Uuid,
    },
    /// Documents owned by `owner` that are public or explicitly granted
    /// to `viewer`.
    SharedBy {
        /// The user whose documents are listed.
        owner: Uuid,
        /// The caller.
        viewer: Uuid,
    },
}

impl ListingScope {
    /// Owner whose documents are listed.
    pub fn owner(&self) -> Uuid {
        match self {
            Self::Owned { owner } | Self::SharedBy { owner, .. } => *owner,
        }
    }
}
