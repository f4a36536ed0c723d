//! GetMembershipStatusHandler - Query handler for a member's current status.

use std::sync::Arc;

use crate::domain::foundation::{ClubId, MemberId};
use crate::domain::membership::{MembershipError, MembershipStatus};
use crate::ports::MembershipRepository;

/// Query for a member's status in a club.
#[derive(Debug, Clone)]
pub struct GetMembershipStatusQuery {
    pub club_id: ClubId,
    pub member_id: MemberId,
}

/// Status of the member's most recent row, live or ended.
pub type GetMembershipStatusResult = Option<MembershipStatus>;

/// Handler for status lookups.
///
/// Not role gated: the status value alone reveals nothing else about the
/// club.
pub struct GetMembershipStatusHandler {
    repository: Arc<dyn MembershipRepository>,
}

impl GetMembershipStatusHandler {
    pub fn new(repository: Arc<dyn MembershipRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetMembershipStatusQuery,
    ) -> Result<GetMembershipStatusResult, MembershipError> {
        let latest = self
            .repository
            .find_latest(&query.club_id, &query.member_id)
            .await?;
        tracing::debug!(club_id = %query.club_id, member_id = %query.member_id, status = ?latest.as_ref().map(|row| row.status), "status lookup");
        Ok(latest.map(|row| row.status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::membership::fixtures::{member, Fixture};

    fn query(fixture: &Fixture, member_id: &MemberId) -> GetMembershipStatusQuery {
        GetMembershipStatusQuery {
            club_id: fixture.club_id,
            member_id: member_id.clone(),
        }
    }

    #[tokio::test]
    async fn reports_live_status() {
        let fixture = Fixture::new().await;
        let bob = fixture.waiting("bob").await;
        let handler = GetMembershipStatusHandler::new(fixture.repository());

        assert_eq!(
            handler.handle(query(&fixture, &bob)).await.unwrap(),
            Some(MembershipStatus::Waiting)
        );
        assert_eq!(
            handler.handle(query(&fixture, &fixture.leader)).await.unwrap(),
            Some(MembershipStatus::Approved)
        );
    }

    #[tokio::test]
    async fn reports_ended_status() {
        let fixture = Fixture::new().await;
        let bob = fixture.approved("bob").await;
        fixture
            .store
            .block(&fixture.club_id, &bob, "spam", &fixture.leader)
            .await
            .unwrap();

        let status = GetMembershipStatusHandler::new(fixture.repository())
            .handle(query(&fixture, &bob))
            .await
            .unwrap();
        assert_eq!(status, Some(MembershipStatus::Blocked));
    }

    #[tokio::test]
    async fn unknown_member_has_no_status() {
        let fixture = Fixture::new().await;
        let status = GetMembershipStatusHandler::new(fixture.repository())
            .handle(query(&fixture, &member("ghost")))
            .await
            .unwrap();
        assert_eq!(status, None);
    }
}
