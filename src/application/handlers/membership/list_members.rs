//! ListMembersHandler - Query handler for a club's roster.

use std::sync::Arc;

use crate::domain::foundation::{ClubId, MemberId};
use crate::domain::membership::{Membership, MembershipError, MembershipStatus};
use crate::ports::{ClubDirectory, MembershipRepository};

use super::access::require_member;

/// Query for the approved members of a club.
#[derive(Debug, Clone)]
pub struct ListMembersQuery {
    pub club_id: ClubId,
    pub actor: MemberId,
}

/// Handler for roster queries. Caller must be a live member.
///
/// Rows come back leader first, then managers, then members, each group
/// in joining order.
pub struct ListMembersHandler {
    repository: Arc<dyn MembershipRepository>,
    directory: Arc<dyn ClubDirectory>,
}

impl ListMembersHandler {
    pub fn new(
        repository: Arc<dyn MembershipRepository>,
        directory: Arc<dyn ClubDirectory>,
    ) -> Self {
        Self {
            repository,
            directory,
        }
    }

    pub async fn handle(&self, query: ListMembersQuery) -> Result<Vec<Membership>, MembershipError> {
        require_member(self.directory.as_ref(), &query.club_id, &query.actor, "list members")
            .await?;

        let mut members: Vec<Membership> = self
            .repository
            .list_live(&query.club_id)
            .await?
            .into_iter()
            .filter(|row| row.status == MembershipStatus::Approved)
            .collect();
        members.sort_by_key(|row| (row.role.rank(), row.joined_at));

        Ok(members)
    }
}
