//! ListWaitingMembersHandler - Query handler for pending join requests.

use std::sync::Arc;

use crate::domain::foundation::{ClubId, MemberId};
use crate::domain::membership::{Membership, MembershipError, MembershipStatus};
use crate::ports::{ClubDirectory, MembershipRepository};

use super::access::require_staff;

/// Query for pending join requests.
#[derive(Debug, Clone)]
pub struct ListWaitingMembersQuery {
    pub club_id: ClubId,
    pub actor: MemberId,
}

/// Handler for the waiting list. Staff only; oldest request first.
pub struct ListWaitingMembersHandler {
    repository: Arc<dyn MembershipRepository>,
    directory: Arc<dyn ClubDirectory>,
}

impl ListWaitingMembersHandler {
    pub fn new(
        repository: Arc<dyn MembershipRepository>,
        directory: Arc<dyn ClubDirectory>,
    ) -> Self {
        Self {
            repository,
            directory,
        }
    }

    pub async fn handle(
        &self,
        query: ListWaitingMembersQuery,
    ) -> Result<Vec<Membership>, MembershipError> {
        require_staff(
            self.directory.as_ref(),
            &query.club_id,
            &query.actor,
            "view join requests",
        )
        .await?;

        let mut waiting: Vec<Membership> = self
            .repository
            .list_live(&query.club_id)
            .await?
            .into_iter()
            .filter(|row| row.status == MembershipStatus::Waiting)
            .collect();
        waiting.sort_by_key(|row| row.joined_at);

        Ok(waiting)
    }
}
