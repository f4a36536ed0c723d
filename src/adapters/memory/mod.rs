//! In-memory adapters.
//!
//! A membership store and a club directory sharing one set of rows. Used by
//! tests and by embedders that do not need durability.

mod club_directory;
mod membership_store;

pub use club_directory::InMemoryClubDirectory;
pub use membership_store::InMemoryMembershipStore;
