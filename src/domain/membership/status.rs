//! Membership status state machine.
//!
//! Defines every state a club membership row can be in and the legal moves
//! between them.
//!
//! ```text
//!             approve            remove(allow_rejoin)
//!  WAITING ───────────► APPROVED ───────────────────► EXPELLED ─┐
//!     │                    │  │  remove(!allow_rejoin)           │
//!     │ reject             │  └─────────────────────► BLOCKED    │ request_join
//!     ▼                    │ withdraw                            │
//!  REJECTED                ▼                                     │
//!     │                WITHDRAWN                                 │
//!     └──────────────────────┴───────────────────────────────────┴──► WAITING
//! ```

use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};
use serde::{Deserialize, Serialize};

/// Status of a member's relationship with a club.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipStatus {
    /// Join request submitted, awaiting a decision from club staff.
    Waiting,

    /// Full member of the club.
    Approved,

    /// Join request turned down. May apply again.
    Rejected,

    /// Removed by staff with rejoining allowed.
    Expelled,

    /// Removed by staff with rejoining forbidden.
    Blocked,

    /// Left the club voluntarily. May apply again.
    Withdrawn,
}

impl MembershipStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [MembershipStatus; 6] = [
        MembershipStatus::Waiting,
        MembershipStatus::Approved,
        MembershipStatus::Rejected,
        MembershipStatus::Expelled,
        MembershipStatus::Blocked,
        MembershipStatus::Withdrawn,
    ];

    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Waiting => "WAITING",
            MembershipStatus::Approved => "APPROVED",
            MembershipStatus::Rejected => "REJECTED",
            MembershipStatus::Expelled => "EXPELLED",
            MembershipStatus::Blocked => "BLOCKED",
            MembershipStatus::Withdrawn => "WITHDRAWN",
        }
    }

    /// Returns true if a row in this status is soft-deleted.
    ///
    /// Ended memberships are retained as history, never hard-deleted.
    pub fn is_ended(&self) -> bool {
        matches!(
            self,
            MembershipStatus::Rejected
                | MembershipStatus::Expelled
                | MembershipStatus::Blocked
                | MembershipStatus::Withdrawn
        )
    }

    /// Returns true if a member whose latest row is in this status may
    /// apply to join again.
    pub fn allows_reapplication(&self) -> bool {
        self.can_transition_to(&MembershipStatus::Waiting)
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MembershipStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MembershipStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::invalid_format("status", format!("unknown status {}", s)))
    }
}

impl StateMachine for MembershipStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use MembershipStatus::*;
        matches!(
            (self, target),
            // From WAITING
            (Waiting, Approved)
                | (Waiting, Rejected)
            // From APPROVED
                | (Approved, Expelled)
                | (Approved, Blocked)
                | (Approved, Withdrawn)
            // Re-application
                | (Rejected, Waiting)
                | (Expelled, Waiting)
                | (Withdrawn, Waiting)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use MembershipStatus::*;
        match self {
            Waiting => vec![Approved, Rejected],
            Approved => vec![Expelled, Blocked, Withdrawn],
            Rejected => vec![Waiting],
            Expelled => vec![Waiting],
            Blocked => vec![],
            Withdrawn => vec![Waiting],
        }
    }
}
