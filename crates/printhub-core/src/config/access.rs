//! Requester access control.

use serde::{Deserialize, Serialize};

/// Which requesters may submit files and manage the queue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Allowed requester IDs. An empty list denies everyone.
    #[serde(default)]
    pub allowed_user_ids: Vec<i64>,
}

impl AccessConfig {
    /// Whether the given requester is on the allow-list.
    pub fn is_allowed(&self, user_id: i64) -> bool {
        self.allowed_user_ids.contains(&user_id)
    }

    /// Whether any requester has been configured.
    pub fn is_configured(&self) -> bool {
        !self.allowed_user_ids.is_empty()
    }
}
