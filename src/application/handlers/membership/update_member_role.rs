//! UpdateMemberRoleHandler - Command handler for promoting and demoting members.

use std::sync::Arc;

use crate::domain::foundation::{ClubId, MemberId};
use crate::domain::membership::{ClubRole, MembershipError, NotificationComposer};
use crate::ports::{ClubDirectory, MembershipRepository, Notifier};

use super::access::{ensure_applied, forbid_self, non_leader_target, require_staff};
use super::dispatch::{club_name, notify_best_effort};

/// Command to move a member between MANAGER and MEMBER.
#[derive(Debug, Clone)]
pub struct UpdateMemberRoleCommand {
    pub club_id: ClubId,
    pub target: MemberId,
    pub actor: MemberId,
    pub new_role: ClubRole,
}

/// Result of a successful role change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateMemberRoleResult {
    pub member_id: MemberId,
    pub previous_role: ClubRole,
    pub role: ClubRole,
}

/// Handler for role changes.
///
/// The leader role can neither be granted nor taken away here, and nobody
/// may change their own role.
pub struct UpdateMemberRoleHandler {
    repository: Arc<dyn MembershipRepository>,
    directory: Arc<dyn ClubDirectory>,
    notifier: Arc<dyn Notifier>,
    composer: NotificationComposer,
}

impl UpdateMemberRoleHandler {
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

    #[tracing::instrument(skip(self, cmd), fields(club_id = %cmd.club_id, target = %cmd.target, actor = %cmd.actor, new_role = %cmd.new_role))]
    pub async fn handle(
        &self,
        cmd: UpdateMemberRoleCommand,
    ) -> Result<UpdateMemberRoleResult, MembershipError> {
        forbid_self(&cmd.actor, &cmd.target, "change the role of")?;
        require_staff(self.directory.as_ref(), &cmd.club_id, &cmd.actor, "change member roles")
            .await?;
        let previous_role =
            non_leader_target(self.directory.as_ref(), &cmd.club_id, &cmd.target, "a role change")
                .await?;
        if !cmd.new_role.is_assignable() {
            return Err(MembershipError::validation(
                "new_role",
                "the leader role cannot be assigned",
            ));
        }

        let affected = self
            .repository
            .update_role(&cmd.club_id, &cmd.target, cmd.new_role, &cmd.actor)
            .await?;
        ensure_applied(affected, &cmd.target, "APPROVED")?;

        tracing::info!(%previous_role, "member role changed");

        let name = club_name(self.directory.as_ref(), &cmd.club_id).await;
        let notification = self.composer.role_changed(
            &cmd.club_id,
            &name,
            cmd.target.clone(),
            &cmd.actor,
            cmd.new_role,
        );
        notify_best_effort(self.notifier.as_ref(), notification).await;

        Ok(UpdateMemberRoleResult {
            member_id: cmd.target,
            previous_role,
            role: cmd.new_role,
        })
    }
}
