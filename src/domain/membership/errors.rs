//! Membership-specific error types.
//!
//! Errors raised by the membership engine. Each variant is one of the kinds
//! a caller must be able to tell apart.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | PermissionDenied | 403 |
//! | InvalidState | 409 |
//! | Conflict | 409 |
//! | ClubNotFound | 404 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use std::fmt;

use crate::domain::foundation::{ClubId, DomainError, ErrorCode, MemberId};
use thiserror::Error;

/// Why a join request conflicts with the applicant's existing membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictReason {
    /// Applicant is already an approved member.
    AlreadyMember,

    /// Applicant already has a pending request.
    AlreadyWaiting,

    /// Applicant was removed with rejoining forbidden.
    RejoinBlocked,

    /// The club already has live members, so it cannot be founded again.
    AlreadyFounded,
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConflictReason::AlreadyMember => "already a member",
            ConflictReason::AlreadyWaiting => "join request already pending",
            ConflictReason::RejoinBlocked => "rejoin blocked",
            ConflictReason::AlreadyFounded => "club already founded",
        };
        f.write_str(s)
    }
}

/// Membership engine errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MembershipError {
    /// The actor's live role does not allow the operation.
    #[error("Permission denied: {reason}")]
    PermissionDenied { reason: String },

    /// The target has no live row in the state the operation requires.
    ///
    /// Also raised when a conditional update affects no rows because a
    /// concurrent request got there first.
    #[error("Member {member_id} has no membership in the required state: {expected}")]
    InvalidState { member_id: MemberId, expected: String },

    /// The member's existing rows rule out the request.
    #[error("Member {member_id} conflicts with club {club_id}: {reason}")]
    Conflict {
        club_id: ClubId,
        member_id: MemberId,
        reason: ConflictReason,
    },

    /// The club does not exist.
    #[error("Club not found: {0}")]
    ClubNotFound(ClubId),

    /// Input failed validation.
    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    /// Store or directory failure.
    #[error("Error: {0}")]
    Infrastructure(String),
}

impl MembershipError {
    pub fn permission_denied(reason: impl Into<String>) -> Self {
        MembershipError::PermissionDenied {
            reason: reason.into(),
        }
    }

    pub fn invalid_state(member_id: MemberId, expected: impl Into<String>) -> Self {
        MembershipError::InvalidState {
            member_id,
            expected: expected.into(),
        }
    }

    pub fn conflict(club_id: ClubId, member_id: MemberId, reason: ConflictReason) -> Self {
        MembershipError::Conflict {
            club_id,
            member_id,
            reason,
        }
    }

    pub fn club_not_found(club_id: ClubId) -> Self {
        MembershipError::ClubNotFound(club_id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MembershipError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MembershipError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MembershipError::PermissionDenied { .. } => ErrorCode::Forbidden,
            MembershipError::InvalidState { .. } => ErrorCode::MembershipNotFound,
            MembershipError::Conflict { reason, .. } => match reason {
                ConflictReason::AlreadyMember => ErrorCode::AlreadyMember,
                ConflictReason::AlreadyWaiting => ErrorCode::AlreadyWaiting,
                ConflictReason::RejoinBlocked => ErrorCode::RejoinBlocked,
                ConflictReason::AlreadyFounded => ErrorCode::ClubAlreadyFounded,
            },
            MembershipError::ClubNotFound(_) => ErrorCode::ClubNotFound,
            MembershipError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MembershipError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, MembershipError::PermissionDenied { .. })
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, MembershipError::InvalidState { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, MembershipError::Conflict { .. })
    }
}

impl From<DomainError> for MembershipError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => MembershipError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => MembershipError::Infrastructure(err.to_string()),
        }
    }
}

impl From<MembershipError> for DomainError {
    fn from(err: MembershipError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
