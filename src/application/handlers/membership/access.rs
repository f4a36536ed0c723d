//! Authorization guards shared by the membership handlers.
//!
//! Every guard reads the actor's role from the directory at call time.

use crate::domain::foundation::{ClubId, MemberId};
use crate::domain::membership::{ClubRole, MembershipError};
use crate::ports::{AffectedRows, ClubDirectory};

/// Requires the actor to hold a live LEADER or MANAGER row.
pub(crate) async fn require_staff(
    directory: &dyn ClubDirectory,
    club_id: &ClubId,
    actor: &MemberId,
    action: &str,
) -> Result<ClubRole, MembershipError> {
    match directory.member_role(club_id, actor).await? {
        Some(role) if role.is_staff() => Ok(role),
        role => {
            tracing::warn!(club_id = %club_id, actor = %actor, ?role, action, "staff role required");
            Err(MembershipError::permission_denied(format!(
                "only a leader or manager may {}",
                action
            )))
        }
    }
}

/// Requires the actor to hold a live approved row of any role.
pub(crate) async fn require_member(
    directory: &dyn ClubDirectory,
    club_id: &ClubId,
    actor: &MemberId,
    action: &str,
) -> Result<ClubRole, MembershipError> {
    directory
        .member_role(club_id, actor)
        .await?
        .ok_or_else(|| {
            tracing::warn!(club_id = %club_id, actor = %actor, action, "membership required");
            MembershipError::permission_denied(format!("only club members may {}", action))
        })
}

pub(crate) fn forbid_self(
    actor: &MemberId,
    target: &MemberId,
    action: &str,
) -> Result<(), MembershipError> {
    if actor == target {
        return Err(MembershipError::permission_denied(format!(
            "a member cannot {} themselves",
            action
        )));
    }
    Ok(())
}

/// Resolves the target's live role for an action that may never touch the
/// leader. A target without a live approved row is an invalid state.
pub(crate) async fn non_leader_target(
    directory: &dyn ClubDirectory,
    club_id: &ClubId,
    target: &MemberId,
    action: &str,
) -> Result<ClubRole, MembershipError> {
    match directory.member_role(club_id, target).await? {
        Some(ClubRole::Leader) => Err(MembershipError::permission_denied(format!(
            "the club leader cannot be targeted by {}",
            action
        ))),
        Some(role) => Ok(role),
        None => Err(MembershipError::invalid_state(
            target.clone(),
            "APPROVED",
        )),
    }
}

/// Maps the affected-row count of a conditional update.
///
/// Zero rows means the precondition no longer held when the update ran,
/// usually because a concurrent call committed first.
pub(crate) fn ensure_applied(
    affected: AffectedRows,
    target: &MemberId,
    expected: &str,
) -> Result<(), MembershipError> {
    if affected == 0 {
        return Err(MembershipError::invalid_state(target.clone(), expected));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str) -> MemberId {
        MemberId::new(id).unwrap()
    }

    #[test]
    fn forbid_self_rejects_same_member() {
        let err = forbid_self(&member("a"), &member("a"), "remove").unwrap_err();
        assert!(err.is_permission_denied());
        assert!(forbid_self(&member("a"), &member("b"), "remove").is_ok());
    }

    #[test]
    fn zero_affected_rows_is_invalid_state() {
        let err = ensure_applied(0, &member("b"), "WAITING").unwrap_err();
        assert!(err.is_invalid_state());
        assert!(ensure_applied(1, &member("b"), "WAITING").is_ok());
    }
}
