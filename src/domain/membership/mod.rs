//! Membership domain module.
//!
//! Handles the club membership lifecycle: join requests, approval, roles,
//! removal and withdrawal.
//!
//! # Module Structure
//!
//! - `aggregate` - Membership row with its transitions
//! - `status` - MembershipStatus state machine
//! - `role` - ClubRole hierarchy
//! - `errors` - MembershipError raised by the engine
//! - `notification` - Messages emitted by transitions

mod aggregate;
mod errors;
mod notification;
mod role;
mod status;

pub use aggregate::Membership;
pub use errors::{ConflictReason, MembershipError};
pub use notification::{ClubLinks, Notification, NotificationComposer, FALLBACK_CLUB_NAME};
pub use role::ClubRole;
pub use status::MembershipStatus;
