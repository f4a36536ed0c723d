//! Notification configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::membership::ClubLinks;

/// Notification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// Path prefix for links in notifications, e.g. `/clubs`
    #[serde(default = "default_link_prefix")]
    pub link_prefix: String,
}

impl NotificationConfig {
    /// Link builder for the configured prefix
    pub fn links(&self) -> ClubLinks {
        ClubLinks::new(self.link_prefix.as_str())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.link_prefix.starts_with('/') {
            return Err(ValidationError::InvalidLinkPrefix(self.link_prefix.clone()));
        }
        Ok(())
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            link_prefix: default_link_prefix(),
        }
    }
}

fn default_link_prefix() -> String {
    "/clubs".to_string()
}
