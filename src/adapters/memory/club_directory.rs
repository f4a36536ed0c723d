//! In-memory club directory.
//!
//! Club profiles are registered explicitly; roles and leadership are read
//! from the shared `InMemoryMembershipStore` rows.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::InMemoryMembershipStore;
use crate::domain::foundation::{ClubId, DomainError, MemberId};
use crate::domain::membership::ClubRole;
use crate::ports::{ClubDirectory, ClubProfile, MembershipRepository};

/// In-memory club directory over a shared membership store.
pub struct InMemoryClubDirectory {
    clubs: RwLock<HashMap<ClubId, ClubProfile>>,
    store: Arc<InMemoryMembershipStore>,
}

impl InMemoryClubDirectory {
    pub fn new(store: Arc<InMemoryMembershipStore>) -> Self {
        Self {
            clubs: RwLock::new(HashMap::new()),
            store,
        }
    }

    /// Make a club known to the directory.
    pub async fn register_club(&self, profile: ClubProfile) {
        self.clubs.write().await.insert(profile.id, profile);
    }

    /// Forget a club. Its membership rows are untouched.
    pub async fn close_club(&self, club_id: &ClubId) {
        self.clubs.write().await.remove(club_id);
    }
}

#[async_trait]
impl ClubDirectory for InMemoryClubDirectory {
    async fn find_club(&self, club_id: &ClubId) -> Result<Option<ClubProfile>, DomainError> {
        Ok(self.clubs.read().await.get(club_id).cloned())
    }

    async fn member_role(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<Option<ClubRole>, DomainError> {
        Ok(self
            .store
            .find_latest(club_id, member_id)
            .await?
            .filter(|row| row.is_active_member())
            .map(|row| row.role))
    }

    async fn find_leader(&self, club_id: &ClubId) -> Result<Option<MemberId>, DomainError> {
        Ok(self
            .store
            .list_live(club_id)
            .await?
            .into_iter()
            .find(|row| row.is_leader())
            .map(|row| row.member_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str) -> MemberId {
        MemberId::new(id).unwrap()
    }

    fn profile(id: ClubId) -> ClubProfile {
        ClubProfile {
            id,
            name: "Hiking Club".to_string(),
            max_members: Some(20),
        }
    }

    #[tokio::test]
    async fn registered_club_is_found_until_closed() {
        let directory = InMemoryClubDirectory::new(Arc::new(InMemoryMembershipStore::new()));
        let club = ClubId::new();
        directory.register_club(profile(club)).await;

        assert_eq!(directory.find_club(&club).await.unwrap(), Some(profile(club)));
        directory.close_club(&club).await;
        assert_eq!(directory.find_club(&club).await.unwrap(), None);
    }

    #[tokio::test]
    async fn role_is_reported_only_for_approved_live_rows() {
        let store = Arc::new(InMemoryMembershipStore::new());
        let directory = InMemoryClubDirectory::new(store.clone());
        let club = ClubId::new();
        store.insert_leader(&club, &member("leader")).await.unwrap();
        store.insert_waiting(&club, &member("b")).await.unwrap();

        assert_eq!(
            directory.member_role(&club, &member("leader")).await.unwrap(),
            Some(ClubRole::Leader)
        );
        assert_eq!(directory.member_role(&club, &member("b")).await.unwrap(), None);

        store.approve(&club, &member("b"), &member("leader")).await.unwrap();
        assert_eq!(
            directory.member_role(&club, &member("b")).await.unwrap(),
            Some(ClubRole::Member)
        );

        store.withdraw(&club, &member("b")).await.unwrap();
        assert_eq!(directory.member_role(&club, &member("b")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn leader_comes_from_rows() {
        let store = Arc::new(InMemoryMembershipStore::new());
        let directory = InMemoryClubDirectory::new(store.clone());
        let club = ClubId::new();
        assert_eq!(directory.find_leader(&club).await.unwrap(), None);

        store.insert_leader(&club, &member("founder")).await.unwrap();
        assert_eq!(directory.find_leader(&club).await.unwrap(), Some(member("founder")));
    }
}
