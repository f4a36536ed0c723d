//! RequestJoinHandler - Command handler for join requests.

use std::sync::Arc;

use crate::domain::foundation::{ClubId, MemberId};
use crate::domain::membership::{
    ConflictReason, Membership, MembershipError, MembershipStatus, NotificationComposer,
};
use crate::ports::{ClubDirectory, MembershipRepository, Notifier};

use super::dispatch::notify_all;

/// Command to apply for membership. The applicant is always the actor.
#[derive(Debug, Clone)]
pub struct RequestJoinCommand {
    pub club_id: ClubId,
    pub applicant: MemberId,
}

/// Result of a successful join request.
#[derive(Debug, Clone)]
pub struct RequestJoinResult {
    pub membership: Membership,
    /// True if an ended row was reused instead of inserting a new one.
    pub reactivated: bool,
}

/// What the applicant's latest row allows.
enum Admission {
    Insert,
    Reactivate,
    Refuse(ConflictReason),
}

impl Admission {
    fn for_latest(latest: Option<&Membership>) -> Self {
        let Some(row) = latest else {
            return Admission::Insert;
        };
        match row.status {
            MembershipStatus::Waiting if row.is_live() => {
                Admission::Refuse(ConflictReason::AlreadyWaiting)
            }
            MembershipStatus::Approved if row.is_live() => {
                Admission::Refuse(ConflictReason::AlreadyMember)
            }
            status if status.allows_reapplication() => Admission::Reactivate,
            _ => Admission::Refuse(ConflictReason::RejoinBlocked),
        }
    }
}

/// Handler for join requests.
///
/// Inserts a fresh WAITING row, or reactivates the applicant's ended row in
/// place, then tells every staff member a request is waiting.
pub struct RequestJoinHandler {
    repository: Arc<dyn MembershipRepository>,
    directory: Arc<dyn ClubDirectory>,
    notifier: Arc<dyn Notifier>,
    composer: NotificationComposer,
}

impl RequestJoinHandler {
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

    #[tracing::instrument(skip(self, cmd), fields(club_id = %cmd.club_id, applicant = %cmd.applicant))]
    pub async fn handle(
        &self,
        cmd: RequestJoinCommand,
    ) -> Result<RequestJoinResult, MembershipError> {
        let club = self
            .directory
            .find_club(&cmd.club_id)
            .await?
            .ok_or(MembershipError::ClubNotFound(cmd.club_id))?;

        let latest = self
            .repository
            .find_latest(&cmd.club_id, &cmd.applicant)
            .await?;

        let (affected, reactivated) = match Admission::for_latest(latest.as_ref()) {
            Admission::Refuse(reason) => {
                return Err(MembershipError::conflict(cmd.club_id, cmd.applicant, reason));
            }
            Admission::Insert => (
                self.repository
                    .insert_waiting(&cmd.club_id, &cmd.applicant)
                    .await?,
                false,
            ),
            Admission::Reactivate => (
                self.repository
                    .reactivate_to_waiting(&cmd.club_id, &cmd.applicant)
                    .await?,
                true,
            ),
        };

        let current = self
            .repository
            .find_latest(&cmd.club_id, &cmd.applicant)
            .await?;

        if affected == 0 {
            // Lost a race; report whatever the winner left behind.
            return Err(match Admission::for_latest(current.as_ref()) {
                Admission::Refuse(reason) => {
                    MembershipError::conflict(cmd.club_id, cmd.applicant, reason)
                }
                _ => MembershipError::invalid_state(cmd.applicant, "no live membership"),
            });
        }

        let membership = current.ok_or_else(|| {
            MembershipError::infrastructure("membership row missing after join request")
        })?;

        tracing::info!(reactivated, "join request recorded");

        match self.repository.find_staff_ids(&cmd.club_id).await {
            Ok(staff) => {
                let notifications = staff
                    .into_iter()
                    .filter(|id| *id != cmd.applicant)
                    .map(|id| {
                        self.composer
                            .join_requested(&cmd.club_id, &club.name, id, &cmd.applicant)
                    })
                    .collect();
                notify_all(self.notifier.as_ref(), notifications).await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "staff lookup failed, join request not announced");
            }
        }

        Ok(RequestJoinResult {
            membership,
            reactivated,
        })
    }
}
