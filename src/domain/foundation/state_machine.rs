//! State machine trait for status enums.
//!
//! Gives lifecycle statuses a single way to declare their legal moves and
//! to perform a checked move.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors only list their legal moves; everything else is derived
/// from `valid_transitions`.
///
/// # Example
///
/// ```ignore
/// let next = MembershipStatus::Waiting.transition_to(MembershipStatus::Approved)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Every state reachable from this one in a single move.
    fn valid_transitions(&self) -> Vec<Self>;

    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Checked move. The error names both states.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// No way out.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
