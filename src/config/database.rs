//! Connection settings for the PostgreSQL membership store

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MAX_POOL_SIZE: u32 = 100;

/// PostgreSQL connection and pool settings
///
/// Only `url` is required; every pool setting has a default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `postgres://` or `postgresql://` connection URL
    pub url: String,

    pub min_connections: u32,
    pub max_connections: u32,

    /// Seconds to wait for a free connection before failing the call
    pub acquire_timeout_secs: u64,

    /// Seconds an unused connection stays open
    pub idle_timeout_secs: u64,

    /// Seconds before a connection is recycled regardless of use
    pub max_lifetime_secs: u64,
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("database.url"));
        }
        let scheme_ok = ["postgres://", "postgresql://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme));
        if !scheme_ok {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.max_connections > MAX_POOL_SIZE {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        if self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            min_connections: 5,
            max_connections: 20,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_url(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn pool_defaults() {
        let config = DatabaseConfig::default();
        assert_eq!((config.min_connections, config.max_connections), (5, 20));
        assert_eq!(config.acquire_timeout(), Duration::from_secs(30));
        assert_eq!(config.idle_timeout(), Duration::from_secs(600));
        assert_eq!(config.max_lifetime(), Duration::from_secs(1800));
    }

    #[test]
    fn url_is_required() {
        assert!(matches!(
            DatabaseConfig::default().validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn only_postgres_urls_are_accepted() {
        assert!(with_url("postgres://clubs@localhost/clubs").validate().is_ok());
        assert!(with_url("postgresql://clubs@localhost/clubs").validate().is_ok());
        assert!(matches!(
            with_url("mysql://clubs@localhost/clubs").validate(),
            Err(ValidationError::InvalidDatabaseUrl)
        ));
    }

    #[test]
    fn pool_bounds_are_checked() {
        let inverted = DatabaseConfig {
            min_connections: 10,
            max_connections: 4,
            ..with_url("postgres://localhost/clubs")
        };
        assert!(matches!(
            inverted.validate(),
            Err(ValidationError::InvalidPoolSize)
        ));

        let oversized = DatabaseConfig {
            max_connections: 150,
            ..with_url("postgres://localhost/clubs")
        };
        assert!(matches!(
            oversized.validate(),
            Err(ValidationError::PoolSizeTooLarge)
        ));
    }
}
