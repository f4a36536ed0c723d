//! Club directory port (read side).
//!
//! Resolves club identity and the live role of a member. The engine uses it
//! for every authorization decision, always at call time: a role carried in
//! a request is never trusted.
//!
//! Backed by the same rows as the membership repository, but kept as its
//! own port because authorization reads are a separate concern from the
//! engine's state mutations.

use crate::domain::foundation::{ClubId, DomainError, MemberId};
use crate::domain::membership::ClubRole;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Reader port for club identity and live roles.
#[async_trait]
pub trait ClubDirectory: Send + Sync {
    /// Look up a club.
    ///
    /// Returns `None` if the club does not exist or has been closed.
    async fn find_club(&self, club_id: &ClubId) -> Result<Option<ClubProfile>, DomainError>;

    /// Current role of a member with a live approved row in the club.
    ///
    /// Returns `None` for waiting, ended or unknown members.
    async fn member_role(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<Option<ClubRole>, DomainError>;

    /// The club's live leader.
    async fn find_leader(&self, club_id: &ClubId) -> Result<Option<MemberId>, DomainError>;
}

/// Club identity as the membership engine sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubProfile {
    pub id: ClubId,
    pub name: String,

    /// Roster limit, if the club has one.
    pub max_members: Option<u32>,
}
