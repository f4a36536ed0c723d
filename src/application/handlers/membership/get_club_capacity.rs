//! GetClubCapacityHandler - Query handler for roster headcounts.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{ClubId, MemberId};
use crate::domain::membership::MembershipError;
use crate::ports::{ClubDirectory, MembershipRepository};

use super::access::require_member;

/// Query for a club's headcounts.
#[derive(Debug, Clone)]
pub struct GetClubCapacityQuery {
    pub club_id: ClubId,
    pub actor: MemberId,
}

/// Headcounts against the club's limit. The limit is informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClubCapacity {
    pub approved: u64,
    pub waiting: u64,
    pub max_members: Option<u32>,
}

pub struct GetClubCapacityHandler {
    repository: Arc<dyn MembershipRepository>,
    directory: Arc<dyn ClubDirectory>,
}

impl GetClubCapacityHandler {
    pub fn new(
        repository: Arc<dyn MembershipRepository>,
        directory: Arc<dyn ClubDirectory>,
    ) -> Self {
        Self {
            repository,
            directory,
        }
    }

    pub async fn handle(&self, query: GetClubCapacityQuery) -> Result<ClubCapacity, MembershipError> {
        let club = self
            .directory
            .find_club(&query.club_id)
            .await?
            .ok_or(MembershipError::ClubNotFound(query.club_id))?;
        require_member(self.directory.as_ref(), &query.club_id, &query.actor, "view capacity")
            .await?;

        let counts = self.repository.count_live(&query.club_id).await?;

        Ok(ClubCapacity {
            approved: counts.approved,
            waiting: counts.waiting,
            max_members: club.max_members,
        })
    }
}
