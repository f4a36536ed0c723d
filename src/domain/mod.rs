//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `membership` - Club membership lifecycle, roles and notifications

pub mod foundation;
pub mod membership;
