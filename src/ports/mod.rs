//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `MembershipRepository` - Membership rows and conditional transitions
//! - `ClubDirectory` - Club identity and live role lookups
//! - `Notifier` - Best-effort notification delivery

mod club_directory;
mod membership_repository;
mod notifier;

pub use club_directory::{ClubDirectory, ClubProfile};
pub use membership_repository::{AffectedRows, MembershipCounts, MembershipRepository};
pub use notifier::Notifier;
