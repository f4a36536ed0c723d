//! Shared setup for handler tests.

use std::sync::Arc;

use crate::adapters::memory::{InMemoryClubDirectory, InMemoryMembershipStore};
use crate::adapters::notification::InMemoryNotifier;
use crate::domain::foundation::{ClubId, MemberId};
use crate::domain::membership::ClubRole;
use crate::ports::{ClubDirectory, ClubProfile, MembershipRepository, Notifier};

pub(crate) fn member(id: &str) -> MemberId {
    MemberId::new(id).unwrap()
}

/// A registered "Chess Club" founded by `leader`.
pub(crate) struct Fixture {
    pub store: Arc<InMemoryMembershipStore>,
    pub directory: Arc<InMemoryClubDirectory>,
    pub notifier: Arc<InMemoryNotifier>,
    pub club_id: ClubId,
    pub leader: MemberId,
}

impl Fixture {
    pub async fn new() -> Self {
        Self::with_notifier(InMemoryNotifier::new()).await
    }

    pub async fn with_notifier(notifier: InMemoryNotifier) -> Self {
        let fixture = Self::unfounded(notifier).await;
        fixture
            .store
            .insert_leader(&fixture.club_id, &fixture.leader)
            .await
            .unwrap();
        fixture
    }

    /// A registered club with no rows yet.
    pub async fn unfounded(notifier: InMemoryNotifier) -> Self {
        let store = Arc::new(InMemoryMembershipStore::new());
        let directory = Arc::new(InMemoryClubDirectory::new(store.clone()));
        let club_id = ClubId::new();
        directory
            .register_club(ClubProfile {
                id: club_id,
                name: "Chess Club".to_string(),
                max_members: Some(30),
            })
            .await;
        Self {
            store,
            directory,
            notifier: Arc::new(notifier),
            club_id,
            leader: member("leader"),
        }
    }

    pub async fn waiting(&self, id: &str) -> MemberId {
        let id = member(id);
        assert_eq!(self.store.insert_waiting(&self.club_id, &id).await.unwrap(), 1);
        id
    }

    pub async fn approved(&self, id: &str) -> MemberId {
        let id = self.waiting(id).await;
        assert_eq!(
            self.store.approve(&self.club_id, &id, &self.leader).await.unwrap(),
            1
        );
        id
    }

    pub async fn manager(&self, id: &str) -> MemberId {
        let id = self.approved(id).await;
        assert_eq!(
            self.store
                .update_role(&self.club_id, &id, ClubRole::Manager, &self.leader)
                .await
                .unwrap(),
            1
        );
        id
    }

    pub async fn directory_leader(&self) -> Option<MemberId> {
        self.directory.find_leader(&self.club_id).await.unwrap()
    }

    pub fn repository(&self) -> Arc<dyn MembershipRepository> {
        self.store.clone()
    }

    pub fn club_directory(&self) -> Arc<dyn ClubDirectory> {
        self.directory.clone()
    }

    pub fn notifier_port(&self) -> Arc<dyn Notifier> {
        self.notifier.clone()
    }
}
