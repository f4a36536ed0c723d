//! In-memory implementation of MembershipRepository.
//!
//! Rows live behind a single async lock; every conditional mutation runs
//! its precondition check and update under one write guard, which gives the
//! same "only one of two racing calls wins" behavior as a conditional SQL
//! `UPDATE`. Transitions reuse the `Membership` aggregate's own rules, so
//! this adapter and the domain can't disagree about what is legal.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{ClubId, DomainError, MemberId};
use crate::domain::membership::{ClubRole, Membership, MembershipStatus};
use crate::ports::{AffectedRows, MembershipCounts, MembershipRepository};

/// In-memory membership store.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(InMemoryMembershipStore::new());
/// store.insert_leader(&club_id, &founder).await?;
/// assert_eq!(store.row_count().await, 1);
/// ```
#[derive(Default)]
pub struct InMemoryMembershipStore {
    rows: RwLock<Vec<Membership>>,
}

impl InMemoryMembershipStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // === Test Helpers ===

    /// Every row ever stored, including ended ones.
    pub async fn all_rows(&self) -> Vec<Membership> {
        self.rows.read().await.clone()
    }

    /// Total number of rows, live or ended.
    pub async fn row_count(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Apply `change` to the pair's live row. Returns 1 if it succeeded,
    /// 0 if there is no live row or the change was refused.
    async fn mutate_live<F>(&self, club_id: &ClubId, member_id: &MemberId, change: F) -> AffectedRows
    where
        F: FnOnce(&mut Membership) -> Result<(), DomainError> + Send,
    {
        let mut rows = self.rows.write().await;
        let Some(row) = rows
            .iter_mut()
            .find(|row| row.is_live() && row.club_id == *club_id && row.member_id == *member_id)
        else {
            return 0;
        };

        // Work on a copy so a refused change leaves the row untouched.
        let mut updated = row.clone();
        match change(&mut updated) {
            Ok(()) => {
                *row = updated;
                1
            }
            Err(err) => {
                tracing::debug!(club_id = %club_id, member_id = %member_id, "conditional update skipped: {}", err);
                0
            }
        }
    }
}

fn latest_index(rows: &[Membership], club_id: &ClubId, member_id: &MemberId) -> Option<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row.club_id == *club_id && row.member_id == *member_id)
        .max_by_key(|(_, row)| (row.is_live(), row.updated_at))
        .map(|(index, _)| index)
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipStore {
    async fn find_latest(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<Option<Membership>, DomainError> {
        let rows = self.rows.read().await;
        Ok(latest_index(&rows, club_id, member_id).map(|index| rows[index].clone()))
    }

    async fn insert_leader(
        &self,
        club_id: &ClubId,
        founder: &MemberId,
    ) -> Result<AffectedRows, DomainError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|row| row.is_live() && row.club_id == *club_id) {
            return Ok(0);
        }
        rows.push(Membership::founding_leader(*club_id, founder.clone()));
        Ok(1)
    }

    async fn insert_waiting(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<AffectedRows, DomainError> {
        let mut rows = self.rows.write().await;
        if latest_index(&rows, club_id, member_id).is_some() {
            return Ok(0);
        }
        rows.push(Membership::waiting(*club_id, member_id.clone()));
        Ok(1)
    }

    async fn reactivate_to_waiting(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<AffectedRows, DomainError> {
        let mut rows = self.rows.write().await;
        let Some(index) = latest_index(&rows, club_id, member_id) else {
            return Ok(0);
        };
        let mut updated = rows[index].clone();
        match updated.reapply() {
            Ok(()) => {
                rows[index] = updated;
                Ok(1)
            }
            Err(_) => Ok(0),
        }
    }

    async fn approve(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
        actor: &MemberId,
    ) -> Result<AffectedRows, DomainError> {
        Ok(self
            .mutate_live(club_id, member_id, |row| row.approve(actor))
            .await)
    }

    async fn reject(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
        reason: &str,
        actor: &MemberId,
    ) -> Result<AffectedRows, DomainError> {
        Ok(self
            .mutate_live(club_id, member_id, |row| row.reject(reason, actor))
            .await)
    }

    async fn update_role(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
        role: ClubRole,
        actor: &MemberId,
    ) -> Result<AffectedRows, DomainError> {
        Ok(self
            .mutate_live(club_id, member_id, |row| row.change_role(role, actor))
            .await)
    }

    async fn expel(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
        reason: &str,
        actor: &MemberId,
    ) -> Result<AffectedRows, DomainError> {
        Ok(self
            .mutate_live(club_id, member_id, |row| row.expel(reason, actor))
            .await)
    }

    async fn block(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
        reason: &str,
        actor: &MemberId,
    ) -> Result<AffectedRows, DomainError> {
        Ok(self
            .mutate_live(club_id, member_id, |row| row.block(reason, actor))
            .await)
    }

    async fn withdraw(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<AffectedRows, DomainError> {
        Ok(self
            .mutate_live(club_id, member_id, |row| row.withdraw())
            .await)
    }

    async fn list_live(&self, club_id: &ClubId) -> Result<Vec<Membership>, DomainError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|row| row.is_live() && row.club_id == *club_id)
            .cloned()
            .collect())
    }

    async fn find_staff_ids(&self, club_id: &ClubId) -> Result<Vec<MemberId>, DomainError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|row| row.is_active_member() && row.club_id == *club_id && row.role.is_staff())
            .map(|row| row.member_id.clone())
            .collect())
    }

    async fn count_live(&self, club_id: &ClubId) -> Result<MembershipCounts, DomainError> {
        let rows = self.rows.read().await;
        let mut counts = MembershipCounts::default();
        for row in rows.iter().filter(|row| row.is_live() && row.club_id == *club_id) {
            match row.status {
                MembershipStatus::Approved => counts.approved += 1,
                MembershipStatus::Waiting => counts.waiting += 1,
                _ => {}
            }
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn member(id: &str) -> MemberId {
        MemberId::new(id).unwrap()
    }

    async fn club_with_leader(store: &InMemoryMembershipStore) -> ClubId {
        let club = ClubId::new();
        assert_eq!(store.insert_leader(&club, &member("leader")).await.unwrap(), 1);
        club
    }

    #[tokio::test]
    async fn insert_leader_only_once_per_club() {
        let store = InMemoryMembershipStore::new();
        let club = club_with_leader(&store).await;
        assert_eq!(store.insert_leader(&club, &member("usurper")).await.unwrap(), 0);
        assert_eq!(store.row_count().await, 1);
    }

    #[tokio::test]
    async fn insert_waiting_refuses_existing_pair() {
        let store = InMemoryMembershipStore::new();
        let club = club_with_leader(&store).await;
        assert_eq!(store.insert_waiting(&club, &member("b")).await.unwrap(), 1);
        assert_eq!(store.insert_waiting(&club, &member("b")).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn approve_applies_only_to_waiting_rows() {
        let store = InMemoryMembershipStore::new();
        let club = club_with_leader(&store).await;
        store.insert_waiting(&club, &member("b")).await.unwrap();

        assert_eq!(store.approve(&club, &member("b"), &member("leader")).await.unwrap(), 1);
        assert_eq!(store.approve(&club, &member("b"), &member("leader")).await.unwrap(), 0);
        assert_eq!(store.approve(&club, &member("ghost"), &member("leader")).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn concurrent_approvals_affect_one_row_total() {
        let store = Arc::new(InMemoryMembershipStore::new());
        let club = club_with_leader(&store).await;
        store.insert_waiting(&club, &member("b")).await.unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .approve(&club, &member("b"), &member("leader"))
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut total = 0;
        for handle in handles {
            total += handle.await.unwrap();
        }
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn leader_row_is_never_mutated() {
        let store = InMemoryMembershipStore::new();
        let club = club_with_leader(&store).await;
        let leader = member("leader");

        assert_eq!(store.update_role(&club, &leader, ClubRole::Member, &leader).await.unwrap(), 0);
        assert_eq!(store.expel(&club, &leader, "x", &leader).await.unwrap(), 0);
        assert_eq!(store.block(&club, &leader, "x", &leader).await.unwrap(), 0);
        assert_eq!(store.withdraw(&club, &leader).await.unwrap(), 0);

        let row = store.find_latest(&club, &leader).await.unwrap().unwrap();
        assert!(row.is_leader());
    }

    #[tokio::test]
    async fn reactivation_reuses_the_ended_row() {
        let store = InMemoryMembershipStore::new();
        let club = club_with_leader(&store).await;
        store.insert_waiting(&club, &member("b")).await.unwrap();
        store.reject(&club, &member("b"), "no", &member("leader")).await.unwrap();

        let ended = store.find_latest(&club, &member("b")).await.unwrap().unwrap();
        assert!(ended.is_deleted);

        assert_eq!(store.reactivate_to_waiting(&club, &member("b")).await.unwrap(), 1);
        let reactivated = store.find_latest(&club, &member("b")).await.unwrap().unwrap();
        assert_eq!(reactivated.id, ended.id);
        assert_eq!(reactivated.status, MembershipStatus::Waiting);
        assert_eq!(store.row_count().await, 2);
    }

    #[tokio::test]
    async fn blocked_row_is_not_reactivated() {
        let store = InMemoryMembershipStore::new();
        let club = club_with_leader(&store).await;
        store.insert_waiting(&club, &member("b")).await.unwrap();
        store.approve(&club, &member("b"), &member("leader")).await.unwrap();
        store.block(&club, &member("b"), "abuse", &member("leader")).await.unwrap();

        assert_eq!(store.reactivate_to_waiting(&club, &member("b")).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn staff_ids_and_counts_reflect_live_rows() {
        let store = InMemoryMembershipStore::new();
        let club = club_with_leader(&store).await;
        let leader = member("leader");
        for id in ["b", "c", "d"] {
            store.insert_waiting(&club, &member(id)).await.unwrap();
        }
        store.approve(&club, &member("b"), &leader).await.unwrap();
        store.approve(&club, &member("c"), &leader).await.unwrap();
        store.update_role(&club, &member("c"), ClubRole::Manager, &leader).await.unwrap();

        let mut staff = store.find_staff_ids(&club).await.unwrap();
        staff.sort();
        assert_eq!(staff, vec![member("c"), leader]);

        let counts = store.count_live(&club).await.unwrap();
        assert_eq!(counts, MembershipCounts { approved: 3, waiting: 1 });
    }
}
