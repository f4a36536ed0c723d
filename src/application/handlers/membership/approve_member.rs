//! ApproveMemberHandler - Command handler for approving join requests.

use std::sync::Arc;

use crate::domain::foundation::{ClubId, MemberId};
use crate::domain::membership::{ClubRole, MembershipError, MembershipStatus, NotificationComposer};
use crate::ports::{ClubDirectory, MembershipRepository, Notifier};

use super::access::{ensure_applied, require_staff};
use super::dispatch::{club_name, notify_best_effort};

/// Command to approve a waiting applicant.
#[derive(Debug, Clone)]
pub struct ApproveMemberCommand {
    pub club_id: ClubId,
    pub target: MemberId,
    pub actor: MemberId,
}

/// Result of a successful approval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproveMemberResult {
    pub member_id: MemberId,
    pub status: MembershipStatus,
    pub role: ClubRole,
}

/// Handler for approving join requests. Staff only.
pub struct ApproveMemberHandler {
    repository: Arc<dyn MembershipRepository>,
    directory: Arc<dyn ClubDirectory>,
    notifier: Arc<dyn Notifier>,
    composer: NotificationComposer,
}

impl ApproveMemberHandler {
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
    pub async fn handle(
        &self,
        cmd: ApproveMemberCommand,
    ) -> Result<ApproveMemberResult, MembershipError> {
        require_staff(self.directory.as_ref(), &cmd.club_id, &cmd.actor, "approve join requests")
            .await?;

        let affected = self
            .repository
            .approve(&cmd.club_id, &cmd.target, &cmd.actor)
            .await?;
        ensure_applied(affected, &cmd.target, "WAITING")?;

        tracing::info!("join request approved");

        let name = club_name(self.directory.as_ref(), &cmd.club_id).await;
        let notification =
            self.composer
                .approved(&cmd.club_id, &name, cmd.target.clone(), &cmd.actor);
        notify_best_effort(self.notifier.as_ref(), notification).await;

        Ok(ApproveMemberResult {
            member_id: cmd.target,
            status: MembershipStatus::Approved,
            role: ClubRole::Member,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::membership::fixtures::{member, Fixture};

    fn handler(fixture: &Fixture) -> ApproveMemberHandler {
        ApproveMemberHandler::new(
            fixture.repository(),
            fixture.club_directory(),
            fixture.notifier_port(),
            NotificationComposer::default(),
        )
    }

    fn command(fixture: &Fixture, target: &MemberId, actor: &MemberId) -> ApproveMemberCommand {
        ApproveMemberCommand {
            club_id: fixture.club_id,
            target: target.clone(),
            actor: actor.clone(),
        }
    }

    #[tokio::test]
    async fn leader_approves_waiting_applicant() {
        let fixture = Fixture::new().await;
        let bob = fixture.waiting("bob").await;

        let result = handler(&fixture)
            .handle(command(&fixture, &bob, &fixture.leader))
            .await
            .unwrap();

        assert_eq!(result.status, MembershipStatus::Approved);
        assert_eq!(result.role, ClubRole::Member);
        let row = fixture.store.find_latest(&fixture.club_id, &bob).await.unwrap().unwrap();
        assert_eq!(row.status, MembershipStatus::Approved);
        assert_eq!(row.updated_by, fixture.leader);
    }

    #[tokio::test]
    async fn only_target_is_notified() {
        let fixture = Fixture::new().await;
        let bob = fixture.waiting("bob").await;

        handler(&fixture)
            .handle(command(&fixture, &bob, &fixture.leader))
            .await
            .unwrap();

        let sent = fixture.notifier.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].receiver_id, bob);
        assert_eq!(sent[0].link_url, format!("/clubs/{}/dashboard", fixture.club_id));
    }

    #[tokio::test]
    async fn manager_may_approve() {
        let fixture = Fixture::new().await;
        let manager = fixture.manager("mia").await;
        let bob = fixture.waiting("bob").await;

        assert!(handler(&fixture)
            .handle(command(&fixture, &bob, &manager))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn plain_member_may_not_approve() {
        let fixture = Fixture::new().await;
        let pat = fixture.approved("pat").await;
        let bob = fixture.waiting("bob").await;

        let err = handler(&fixture)
            .handle(command(&fixture, &bob, &pat))
            .await
            .unwrap_err();
        assert!(err.is_permission_denied());
        assert!(fixture.notifier.sent().await.is_empty());
    }

    #[tokio::test]
    async fn second_approval_is_invalid_state() {
        let fixture = Fixture::new().await;
        let bob = fixture.waiting("bob").await;
        let handler = handler(&fixture);

        handler.handle(command(&fixture, &bob, &fixture.leader)).await.unwrap();
        let err = handler
            .handle(command(&fixture, &bob, &fixture.leader))
            .await
            .unwrap_err();
        assert!(err.is_invalid_state());
    }

    #[tokio::test]
    async fn approving_a_stranger_is_invalid_state() {
        let fixture = Fixture::new().await;
        let err = handler(&fixture)
            .handle(command(&fixture, &member("ghost"), &fixture.leader))
            .await
            .unwrap_err();
        assert!(err.is_invalid_state());
    }
}
