//! RejectMemberHandler - Command handler for rejecting join requests.

use std::sync::Arc;

use crate::domain::foundation::{ClubId, MemberId};
use crate::domain::membership::{MembershipError, NotificationComposer};
use crate::ports::{ClubDirectory, MembershipRepository, Notifier};

use super::access::{ensure_applied, require_staff};
use super::dispatch::{club_name, notify_best_effort};

/// Command to reject a waiting applicant.
#[derive(Debug, Clone)]
pub struct RejectMemberCommand {
    pub club_id: ClubId,
    pub target: MemberId,
    pub actor: MemberId,
    pub reason: String,
}

/// Handler for rejecting join requests.
///
/// The row is ended and soft-deleted; the applicant may apply again later.
pub struct RejectMemberHandler {
    repository: Arc<dyn MembershipRepository>,
    directory: Arc<dyn ClubDirectory>,
    notifier: Arc<dyn Notifier>,
    composer: NotificationComposer,
}

impl RejectMemberHandler {
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

    #[tracing::instrument(skip(self, cmd), fields(club_id = %cmd.club_id, target = %cmd.target, actor = %cmd.actor))]
    pub async fn handle(&self, cmd: RejectMemberCommand) -> Result<(), MembershipError> {
        require_staff(self.directory.as_ref(), &cmd.club_id, &cmd.actor, "reject join requests")
            .await?;

        let affected = self
            .repository
            .reject(&cmd.club_id, &cmd.target, &cmd.reason, &cmd.actor)
            .await?;
        ensure_applied(affected, &cmd.target, "WAITING")?;

        tracing::info!("join request rejected");

        let name = club_name(self.directory.as_ref(), &cmd.club_id).await;
        let notification = self.composer.rejected(
            &cmd.club_id,
            &name,
            cmd.target,
            &cmd.actor,
            &cmd.reason,
        );
        notify_best_effort(self.notifier.as_ref(), notification).await;

        Ok(())
    }
}
