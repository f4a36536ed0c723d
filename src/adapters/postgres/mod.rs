//! PostgreSQL adapters - Database implementations for the membership ports.
//!
//! - `PostgresMembershipRepository` - Membership rows and conditional transitions
//! - `PostgresClubDirectory` - Club identity and live role lookups
//!
//! Both expect the `clubs` table below alongside `club_members` (see
//! `membership_repository`). Creating the schema is left to the embedding
//! application.
//!
//! ```sql
//! CREATE TABLE clubs (
//!     id          UUID PRIMARY KEY,
//!     name        TEXT NOT NULL,
//!     max_members INTEGER,
//!     is_deleted  BOOLEAN NOT NULL DEFAULT FALSE
//! );
//! ```

mod club_directory;
mod membership_repository;

pub use club_directory::PostgresClubDirectory;
pub use membership_repository::PostgresMembershipRepository;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;
use crate::domain::foundation::DomainError;

/// Open a connection pool sized and timed from configuration.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(Some(config.idle_timeout()))
        .max_lifetime(Some(config.max_lifetime()))
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::database(format!("Failed to connect to database: {}", e)))
}
