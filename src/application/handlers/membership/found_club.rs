//! FoundClubHandler - Command handler for seating a club's founding leader.

use std::sync::Arc;

use crate::domain::foundation::{ClubId, MemberId};
use crate::domain::membership::{ConflictReason, Membership, MembershipError};
use crate::ports::{ClubDirectory, MembershipRepository};

/// Command to register the founder of a newly created club.
#[derive(Debug, Clone)]
pub struct FoundClubCommand {
    pub club_id: ClubId,
    pub founder: MemberId,
}

/// Handler for founding a club.
///
/// The only path that ever writes the LEADER role. The founder's row is
/// approved immediately. A club that already has live rows is refused.
pub struct FoundClubHandler {
    repository: Arc<dyn MembershipRepository>,
    directory: Arc<dyn ClubDirectory>,
}

impl FoundClubHandler {
    pub fn new(
        repository: Arc<dyn MembershipRepository>,
        directory: Arc<dyn ClubDirectory>,
    ) -> Self {
        Self {
            repository,
            directory,
        }
    }

    #[tracing::instrument(skip(self, cmd), fields(club_id = %cmd.club_id, founder = %cmd.founder))]
    pub async fn handle(&self, cmd: FoundClubCommand) -> Result<Membership, MembershipError> {
        if self.directory.find_club(&cmd.club_id).await?.is_none() {
            return Err(MembershipError::club_not_found(cmd.club_id));
        }

        let affected = self
            .repository
            .insert_leader(&cmd.club_id, &cmd.founder)
            .await?;
        if affected == 0 {
            return Err(MembershipError::conflict(
                cmd.club_id,
                cmd.founder,
                ConflictReason::AlreadyFounded,
            ));
        }

        tracing::info!("club founded");

        self.repository
            .find_latest(&cmd.club_id, &cmd.founder)
            .await?
            .ok_or_else(|| MembershipError::infrastructure("leader row missing after insert"))
    }
}
