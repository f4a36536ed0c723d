//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers mutate membership rows; query handlers read them.
//! `MembershipEngine` exposes both behind explicit-parameter methods.

pub mod handlers;
mod membership_engine;

pub use handlers::{
    ApproveMemberResult, ClubCapacity, RemoveMemberResult, RequestJoinResult,
    UpdateMemberRoleResult,
};
pub use membership_engine::MembershipEngine;
