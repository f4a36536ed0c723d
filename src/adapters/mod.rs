//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory membership store and club directory
//! - `postgres` - PostgreSQL-backed store and directory
//! - `notification` - Notifier implementations (tracing, recording)

pub mod memory;
pub mod notification;
pub mod postgres;

pub use memory::{InMemoryClubDirectory, InMemoryMembershipStore};
pub use notification::{InMemoryNotifier, TracingNotifier};
pub use postgres::{connect_pool, PostgresClubDirectory, PostgresMembershipRepository};
