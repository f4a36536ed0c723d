//! Membership row aggregate.
//!
//! A `Membership` is one row in the history of a (club, member) pair. Rows
//! are never hard-deleted: a row that ends (rejection, removal, withdrawal)
//! is soft-deleted and kept, both as audit trail and so a block can be
//! enforced on later join requests. Re-applying reactivates the most recent
//! row in place.
//!
//! # Design Decisions
//!
//! - **One live row per pair**: at most one row with `is_deleted == false`
//!   exists per (club, member)
//! - **Leader is immutable**: only `founding_leader` produces a leader row,
//!   and no transition touches a leader row
//! - **Role only matters while approved**: waiting rows carry `Member`

use crate::domain::foundation::{
    ClubId, DomainError, ErrorCode, MemberId, MembershipId, StateMachine, Timestamp,
};
use serde::{Deserialize, Serialize};

use super::{ClubRole, MembershipStatus};

/// Membership row.
///
/// # Invariants
///
/// - `is_deleted == status.is_ended()`
/// - `role == Leader` only on the founder's row
/// - `reason` is set only by rejection or removal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub id: MembershipId,
    pub club_id: ClubId,
    pub member_id: MemberId,
    pub status: MembershipStatus,
    pub role: ClubRole,

    /// Reason recorded on rejection or removal.
    pub reason: Option<String>,

    /// When the member applied (while waiting) or was admitted (once approved).
    pub joined_at: Timestamp,

    pub updated_by: MemberId,
    pub updated_at: Timestamp,
    pub is_deleted: bool,
}

impl Membership {
    /// Creates the founder's row: approved, leader, live.
    pub fn founding_leader(club_id: ClubId, founder: MemberId) -> Self {
        let now = Timestamp::now();
        Self {
            id: MembershipId::new(),
            club_id,
            member_id: founder.clone(),
            status: MembershipStatus::Approved,
            role: ClubRole::Leader,
            reason: None,
            joined_at: now,
            updated_by: founder,
            updated_at: now,
            is_deleted: false,
        }
    }

    /// Creates a fresh join request.
    pub fn waiting(club_id: ClubId, applicant: MemberId) -> Self {
        let now = Timestamp::now();
        Self {
            id: MembershipId::new(),
            club_id,
            member_id: applicant.clone(),
            status: MembershipStatus::Waiting,
            role: ClubRole::Member,
            reason: None,
            joined_at: now,
            updated_by: applicant,
            updated_at: now,
            is_deleted: false,
        }
    }

    /// Returns true if this row has not been soft-deleted.
    pub fn is_live(&self) -> bool {
        !self.is_deleted
    }

    /// Returns true for a live approved row.
    pub fn is_active_member(&self) -> bool {
        self.is_live() && self.status == MembershipStatus::Approved
    }

    /// Returns true for the live leader row.
    pub fn is_leader(&self) -> bool {
        self.is_active_member() && self.role == ClubRole::Leader
    }

    /// Approve a pending join request. The new member joins as `Member`.
    pub fn approve(&mut self, actor: &MemberId) -> Result<(), DomainError> {
        self.transition_to(MembershipStatus::Approved)?;
        let now = Timestamp::now();
        self.role = ClubRole::Member;
        self.joined_at = now;
        self.touch(actor, now);
        Ok(())
    }

    /// Turn down a pending join request.
    pub fn reject(&mut self, reason: &str, actor: &MemberId) -> Result<(), DomainError> {
        self.transition_to(MembershipStatus::Rejected)?;
        self.reason = Some(reason.to_string());
        self.touch(actor, Timestamp::now());
        Ok(())
    }

    /// Change an approved member's role.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if `role` is `Leader`
    /// - `Forbidden` if this row belongs to the leader
    /// - `InvalidStateTransition` if the row is not a live approved row
    pub fn change_role(&mut self, role: ClubRole, actor: &MemberId) -> Result<(), DomainError> {
        if !role.is_assignable() {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                "The leader role cannot be assigned",
            ));
        }
        self.ensure_not_leader()?;
        if !self.is_active_member() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot change role of a {:?} membership", self.status),
            ));
        }
        self.role = role;
        self.touch(actor, Timestamp::now());
        Ok(())
    }

    /// Remove an approved member who may later re-apply.
    pub fn expel(&mut self, reason: &str, actor: &MemberId) -> Result<(), DomainError> {
        self.remove(MembershipStatus::Expelled, reason, actor)
    }

    /// Remove an approved member for good.
    pub fn block(&mut self, reason: &str, actor: &MemberId) -> Result<(), DomainError> {
        self.remove(MembershipStatus::Blocked, reason, actor)
    }

    /// Leave the club voluntarily.
    pub fn withdraw(&mut self) -> Result<(), DomainError> {
        self.ensure_not_leader()?;
        self.transition_to(MembershipStatus::Withdrawn)?;
        let member = self.member_id.clone();
        self.touch(&member, Timestamp::now());
        Ok(())
    }

    /// Reactivate an ended row as a new join request.
    ///
    /// # Errors
    ///
    /// `InvalidStateTransition` if the row is live or blocked.
    pub fn reapply(&mut self) -> Result<(), DomainError> {
        if self.is_live() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Only an ended membership can be reactivated",
            ));
        }
        self.status = self.status.transition_to(MembershipStatus::Waiting).map_err(|_| {
            DomainError::new(
                ErrorCode::RejoinBlocked,
                format!("Cannot re-apply from {:?}", self.status),
            )
        })?;
        let now = Timestamp::now();
        let member = self.member_id.clone();
        self.role = ClubRole::Member;
        self.reason = None;
        self.joined_at = now;
        self.is_deleted = false;
        self.touch(&member, now);
        Ok(())
    }

    fn remove(
        &mut self,
        target: MembershipStatus,
        reason: &str,
        actor: &MemberId,
    ) -> Result<(), DomainError> {
        self.ensure_not_leader()?;
        self.transition_to(target)?;
        self.reason = Some(reason.to_string());
        self.touch(actor, Timestamp::now());
        Ok(())
    }

    fn ensure_not_leader(&self) -> Result<(), DomainError> {
        if self.role == ClubRole::Leader {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "The club leader's membership cannot be changed",
            ));
        }
        Ok(())
    }

    fn touch(&mut self, actor: &MemberId, at: Timestamp) {
        self.updated_by = actor.clone();
        self.updated_at = at;
    }

    /// Transition a live row to a new status using the state machine.
    fn transition_to(&mut self, target: MembershipStatus) -> Result<(), DomainError> {
        if !self.is_live() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Membership {} has already ended", self.id),
            ));
        }
        self.status = self.status.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Cannot transition membership from {:?} to {:?}",
                    self.status, target
                ),
            )
        })?;
        self.is_deleted = target.is_ended();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str) -> MemberId {
        MemberId::new(id).unwrap()
    }

    fn waiting_row() -> Membership {
        Membership::waiting(ClubId::new(), member("applicant"))
    }

    fn approved_row() -> Membership {
        let mut row = waiting_row();
        row.approve(&member("leader")).unwrap();
        row
    }

    // Construction tests

    #[test]
    fn founding_leader_is_live_approved_leader() {
        let row = Membership::founding_leader(ClubId::new(), member("founder"));
        assert!(row.is_leader());
        assert_eq!(row.updated_by, member("founder"));
    }

    #[test]
    fn waiting_row_is_live_member() {
        let row = waiting_row();
        assert_eq!(row.status, MembershipStatus::Waiting);
        assert_eq!(row.role, ClubRole::Member);
        assert!(row.is_live());
        assert!(!row.is_active_member());
    }

    // Transition tests

    #[test]
    fn approve_makes_member_and_records_actor() {
        let row = approved_row();
        assert_eq!(row.status, MembershipStatus::Approved);
        assert_eq!(row.role, ClubRole::Member);
        assert_eq!(row.updated_by, member("leader"));
    }

    #[test]
    fn approve_twice_fails() {
        let mut row = approved_row();
        let err = row.approve(&member("leader")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn reject_soft_deletes_and_keeps_reason() {
        let mut row = waiting_row();
        row.reject("club is full", &member("leader")).unwrap();
        assert_eq!(row.status, MembershipStatus::Rejected);
        assert!(row.is_deleted);
        assert_eq!(row.reason.as_deref(), Some("club is full"));
    }

    #[test]
    fn change_role_promotes_member() {
        let mut row = approved_row();
        row.change_role(ClubRole::Manager, &member("leader")).unwrap();
        assert_eq!(row.role, ClubRole::Manager);
    }

    #[test]
    fn change_role_refuses_leader_as_new_role() {
        let mut row = approved_row();
        let err = row.change_role(ClubRole::Leader, &member("leader")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(row.role, ClubRole::Member);
    }

    #[test]
    fn change_role_refuses_leader_row() {
        let mut row = Membership::founding_leader(ClubId::new(), member("founder"));
        let err = row.change_role(ClubRole::Member, &member("manager")).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(row.role, ClubRole::Leader);
    }

    #[test]
    fn change_role_refuses_waiting_row() {
        let mut row = waiting_row();
        let err = row.change_role(ClubRole::Manager, &member("leader")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn expel_and_block_soft_delete() {
        let mut expelled = approved_row();
        expelled.expel("spam", &member("leader")).unwrap();
        assert_eq!(expelled.status, MembershipStatus::Expelled);
        assert!(expelled.is_deleted);

        let mut blocked = approved_row();
        blocked.block("abuse", &member("leader")).unwrap();
        assert_eq!(blocked.status, MembershipStatus::Blocked);
        assert!(blocked.is_deleted);
    }

    #[test]
    fn leader_cannot_be_removed_or_withdraw() {
        let mut row = Membership::founding_leader(ClubId::new(), member("founder"));
        assert!(row.expel("x", &member("m")).is_err());
        assert!(row.block("x", &member("m")).is_err());
        assert!(row.withdraw().is_err());
        assert!(row.is_leader());
    }

    #[test]
    fn withdraw_records_member_as_updater() {
        let mut row = approved_row();
        row.withdraw().unwrap();
        assert_eq!(row.status, MembershipStatus::Withdrawn);
        assert_eq!(row.updated_by, member("applicant"));
        assert!(row.is_deleted);
    }

    #[test]
    fn ended_row_cannot_transition_again() {
        let mut row = approved_row();
        row.withdraw().unwrap();
        assert!(row.withdraw().is_err());
    }

    // Re-application tests

    #[test]
    fn reapply_reactivates_same_row() {
        let mut row = waiting_row();
        let id = row.id;
        row.reject("incomplete profile", &member("leader")).unwrap();
        row.reapply().unwrap();

        assert_eq!(row.id, id);
        assert_eq!(row.status, MembershipStatus::Waiting);
        assert!(row.is_live());
        assert!(row.reason.is_none());
    }

    #[test]
    fn reapply_refused_when_blocked() {
        let mut row = approved_row();
        row.block("abuse", &member("leader")).unwrap();
        let err = row.reapply().unwrap_err();
        assert_eq!(err.code, ErrorCode::RejoinBlocked);
        assert!(row.is_deleted);
    }

    #[test]
    fn reapply_refused_for_live_row() {
        let mut row = approved_row();
        assert!(row.reapply().is_err());
    }
}
