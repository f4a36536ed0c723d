//! Membership repository port (write side).
//!
//! Defines the contract for the membership store: row lookup and one
//! conditional mutation per lifecycle transition.
//!
//! # Design
//!
//! - **Conditional updates**: every mutation applies only when the row is in
//!   the expected state and reports how many rows it touched
//! - **Atomic**: the precondition check, the mutation and the audit fields
//!   commit together, so two concurrent `approve` calls on the same request
//!   cannot both report one affected row
//! - **Soft delete**: ended rows stay in the store with `is_deleted = true`
//!
//! # Example
//!
//! ```ignore
//! async fn approve(
//!     repo: &dyn MembershipRepository,
//!     club_id: &ClubId,
//!     target: &MemberId,
//!     actor: &MemberId,
//! ) -> Result<(), MembershipError> {
//!     if repo.approve(club_id, target, actor).await? == 0 {
//!         return Err(MembershipError::invalid_state(target.clone(), "WAITING"));
//!     }
//!     Ok(())
//! }
//! ```

use crate::domain::foundation::{ClubId, DomainError, MemberId};
use crate::domain::membership::{ClubRole, Membership};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Number of rows a conditional mutation touched. Zero means the
/// precondition did not hold.
pub type AffectedRows = u64;

/// Repository port for membership rows.
///
/// Implementations must ensure:
/// - At most one live row per (club, member)
/// - Each mutation is a single atomic conditional update
/// - Leader rows are never touched by `update_role`, `expel`, `block`
///   or `withdraw`
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Find the most recent row for a member in a club, live or ended.
    async fn find_latest(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<Option<Membership>, DomainError>;

    /// Insert the founder's approved leader row.
    ///
    /// Applies only when the club has no live rows at all.
    async fn insert_leader(
        &self,
        club_id: &ClubId,
        founder: &MemberId,
    ) -> Result<AffectedRows, DomainError>;

    /// Insert a fresh waiting row.
    ///
    /// Applies only when the member has never had a row in the club.
    async fn insert_waiting(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<AffectedRows, DomainError>;

    /// Reactivate the member's most recent ended row to `WAITING`.
    ///
    /// Applies only when that row is `REJECTED`, `EXPELLED` or `WITHDRAWN`.
    async fn reactivate_to_waiting(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<AffectedRows, DomainError>;

    /// `WAITING` → `APPROVED` with role `MEMBER`.
    async fn approve(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
        actor: &MemberId,
    ) -> Result<AffectedRows, DomainError>;

    /// `WAITING` → `REJECTED`, soft-deleted.
    async fn reject(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
        reason: &str,
        actor: &MemberId,
    ) -> Result<AffectedRows, DomainError>;

    /// Set the role of a live, approved, non-leader row.
    async fn update_role(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
        role: ClubRole,
        actor: &MemberId,
    ) -> Result<AffectedRows, DomainError>;

    /// Approved non-leader → `EXPELLED`, soft-deleted.
    async fn expel(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
        reason: &str,
        actor: &MemberId,
    ) -> Result<AffectedRows, DomainError>;

    /// Approved non-leader → `BLOCKED`, soft-deleted.
    async fn block(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
        reason: &str,
        actor: &MemberId,
    ) -> Result<AffectedRows, DomainError>;

    /// Approved non-leader → `WITHDRAWN`, soft-deleted.
    async fn withdraw(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<AffectedRows, DomainError>;

    /// All live rows of a club, in no particular order.
    async fn list_live(&self, club_id: &ClubId) -> Result<Vec<Membership>, DomainError>;

    /// Member IDs of the club's live leader and managers.
    async fn find_staff_ids(&self, club_id: &ClubId) -> Result<Vec<MemberId>, DomainError>;

    /// Live row counts by status.
    async fn count_live(&self, club_id: &ClubId) -> Result<MembershipCounts, DomainError>;
}

/// Live row counts for a club.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipCounts {
    pub approved: u64,
    pub waiting: u64,
}
