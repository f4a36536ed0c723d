//! WithdrawMembershipHandler - Command handler for leaving a club.

use std::sync::Arc;

use crate::domain::foundation::{ClubId, MemberId};
use crate::domain::membership::{ClubRole, MembershipError, NotificationComposer};
use crate::ports::{ClubDirectory, MembershipRepository, Notifier};

use super::access::ensure_applied;
use super::dispatch::{club_name, notify_best_effort};

/// Command for a member to leave a club. The member is always the actor.
#[derive(Debug, Clone)]
pub struct WithdrawMembershipCommand {
    pub club_id: ClubId,
    pub member_id: MemberId,
}

/// Handler for voluntary withdrawal.
///
/// The leader cannot withdraw. The row ends as WITHDRAWN and the leader is
/// told.
pub struct WithdrawMembershipHandler {
    repository: Arc<dyn MembershipRepository>,
    directory: Arc<dyn ClubDirectory>,
    notifier: Arc<dyn Notifier>,
    composer: NotificationComposer,
}

impl WithdrawMembershipHandler {
    pub fn new(
        repository: Arc<dyn MembershipRepository>,
        directory: Arc<dyn ClubDirectory>,
        notifier: Arc<dyn Notifier>,
        composer: NotificationComposer,
    ) -> Self {
        Self {
            repository,
            directory,
            notifier,
            composer,
        }
    }

    #[tracing::instrument(skip(self, cmd), fields(club_id = %cmd.club_id, member_id = %cmd.member_id))]
    pub async fn handle(&self, cmd: WithdrawMembershipCommand) -> Result<(), MembershipError> {
        match self.directory.member_role(&cmd.club_id, &cmd.member_id).await? {
            Some(ClubRole::Leader) => {
                return Err(MembershipError::permission_denied(
                    "the club leader cannot withdraw",
                ));
            }
            Some(_) => {}
            None => {
                return Err(MembershipError::invalid_state(cmd.member_id, "APPROVED"));
            }
        }

        let affected = self
            .repository
            .withdraw(&cmd.club_id, &cmd.member_id)
            .await?;
        ensure_applied(affected, &cmd.member_id, "APPROVED")?;

        tracing::info!("member withdrew");

        match self.directory.find_leader(&cmd.club_id).await {
            Ok(Some(leader)) if leader != cmd.member_id => {
                let name = club_name(self.directory.as_ref(), &cmd.club_id).await;
                let notification =
                    self.composer
                        .withdrew(&cmd.club_id, &name, leader, &cmd.member_id);
                notify_best_effort(self.notifier.as_ref(), notification).await;
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(error = %err, "leader lookup failed, withdrawal not announced");
            }
        }

        Ok(())
    }
}
