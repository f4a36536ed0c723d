//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CLUB_MEMBERSHIP` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use club_membership::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Notification links under {}", config.notifications.link_prefix);
//! ```

mod database;
mod error;
mod notifications;
mod telemetry;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use notifications::NotificationConfig;
pub use telemetry::TelemetryConfig;

use serde::Deserialize;

const ENV_PREFIX: &str = "CLUB_MEMBERSHIP";

/// Everything an embedding service needs to wire the engine.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Notification link configuration
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Log filter and format
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Read `.env` (if any), then `CLUB_MEMBERSHIP__*` variables.
    ///
    /// Double underscores descend into sections:
    /// `CLUB_MEMBERSHIP__DATABASE__URL` sets `database.url`,
    /// `CLUB_MEMBERSHIP__NOTIFICATIONS__LINK_PREFIX` sets
    /// `notifications.link_prefix`. Only `database.url` is mandatory.
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                tracing::warn!(error = %err, "ignoring unreadable .env file");
            }
        }

        let source = config::Environment::default()
            .prefix(ENV_PREFIX)
            .separator("__");

        Ok(config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?)
    }

    /// Semantic checks that deserialization cannot express.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.database.validate()?;
        self.notifications.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Process environment is shared across test threads.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var(
            "CLUB_MEMBERSHIP__DATABASE__URL",
            "postgresql://test@localhost/test",
        );
    }

    fn clear_env() {
        env::remove_var("CLUB_MEMBERSHIP__DATABASE__URL");
        env::remove_var("CLUB_MEMBERSHIP__DATABASE__MAX_CONNECTIONS");
        env::remove_var("CLUB_MEMBERSHIP__NOTIFICATIONS__LINK_PREFIX");
        env::remove_var("CLUB_MEMBERSHIP__TELEMETRY__JSON");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_section_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.notifications.link_prefix, "/clubs");
        assert_eq!(config.telemetry.log_filter, "info");
        assert!(!config.telemetry.json);
        assert_eq!(config.database.max_connections, 20);
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CLUB_MEMBERSHIP__DATABASE__MAX_CONNECTIONS", "8");
        env::set_var("CLUB_MEMBERSHIP__NOTIFICATIONS__LINK_PREFIX", "/groups");
        env::set_var("CLUB_MEMBERSHIP__TELEMETRY__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.database.max_connections, 8);
        assert_eq!(config.notifications.link_prefix, "/groups");
        assert!(config.telemetry.json);
    }

    #[test]
    fn test_missing_database_url_fails() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        assert!(AppConfig::load().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_prefix() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CLUB_MEMBERSHIP__NOTIFICATIONS__LINK_PREFIX", "groups");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidLinkPrefix(_))
        ));
    }
}
