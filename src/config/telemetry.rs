//! Telemetry configuration

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use super::error::ValidationError;

/// Log output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Filter used when `RUST_LOG` is unset, e.g. `info,club_membership=debug`
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl TelemetryConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        EnvFilter::try_new(&self.log_filter)
            .map(|_| ())
            .map_err(|e| ValidationError::InvalidLogFilter(e.to_string()))
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}
