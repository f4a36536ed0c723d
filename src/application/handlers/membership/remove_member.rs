//! RemoveMemberHandler - Command handler for expelling or blocking members.

use std::sync::Arc;

use crate::domain::foundation::{ClubId, MemberId};
use crate::domain::membership::{MembershipError, MembershipStatus, NotificationComposer};
use crate::ports::{ClubDirectory, MembershipRepository, Notifier};

use super::access::{ensure_applied, forbid_self, non_leader_target, require_staff};
use super::dispatch::{club_name, notify_best_effort};

/// Command to remove an approved member.
#[derive(Debug, Clone)]
pub struct RemoveMemberCommand {
    pub club_id: ClubId,
    pub target: MemberId,
    pub actor: MemberId,
    pub reason: String,
    /// EXPELLED when true, BLOCKED when false.
    pub allow_rejoin: bool,
}

/// Result of a successful removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveMemberResult {
    pub member_id: MemberId,
    pub status: MembershipStatus,
}

/// Handler for forced removal.
///
/// Members leave on their own through `WithdrawMembershipHandler`; this
/// handler refuses self-removal.
pub struct RemoveMemberHandler {
    repository: Arc<dyn MembershipRepository>,
    directory: Arc<dyn ClubDirectory>,
    notifier: Arc<dyn Notifier>,
    composer: NotificationComposer,
}

impl RemoveMemberHandler {
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

    #[tracing::instrument(skip(self, cmd), fields(club_id = %cmd.club_id, target = %cmd.target, actor = %cmd.actor, allow_rejoin = cmd.allow_rejoin))]
    pub async fn handle(
        &self,
        cmd: RemoveMemberCommand,
    ) -> Result<RemoveMemberResult, MembershipError> {
        forbid_self(&cmd.actor, &cmd.target, "remove")?;
        require_staff(self.directory.as_ref(), &cmd.club_id, &cmd.actor, "remove members").await?;
        non_leader_target(self.directory.as_ref(), &cmd.club_id, &cmd.target, "removal").await?;

        let (affected, status) = if cmd.allow_rejoin {
            let affected = self
                .repository
                .expel(&cmd.club_id, &cmd.target, &cmd.reason, &cmd.actor)
                .await?;
            (affected, MembershipStatus::Expelled)
        } else {
            let affected = self
                .repository
                .block(&cmd.club_id, &cmd.target, &cmd.reason, &cmd.actor)
                .await?;
            (affected, MembershipStatus::Blocked)
        };
        ensure_applied(affected, &cmd.target, "APPROVED")?;

        tracing::info!(%status, "member removed");

        let name = club_name(self.directory.as_ref(), &cmd.club_id).await;
        let notification = self.composer.removed(
            &cmd.club_id,
            &name,
            cmd.target.clone(),
            &cmd.actor,
            &cmd.reason,
            cmd.allow_rejoin,
        );
        notify_best_effort(self.notifier.as_ref(), notification).await;

        Ok(RemoveMemberResult {
            member_id: cmd.target,
            status,
        })
    }
}
