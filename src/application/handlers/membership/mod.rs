//! Membership command and query handlers.
//!
//! One handler per operation. Commands mutate through a single conditional
//! repository call and notify after it commits; queries are role gated
//! reads.

mod access;
mod dispatch;
#[cfg(test)]
mod fixtures;

mod approve_member;
mod found_club;
mod get_club_capacity;
mod get_membership_status;
mod list_members;
mod list_waiting_members;
mod reject_member;
mod remove_member;
mod request_join;
mod update_member_role;
mod withdraw_membership;

pub use approve_member::{ApproveMemberCommand, ApproveMemberHandler, ApproveMemberResult};
pub use found_club::{FoundClubCommand, FoundClubHandler};
pub use get_club_capacity::{ClubCapacity, GetClubCapacityHandler, GetClubCapacityQuery};
pub use get_membership_status::{
    GetMembershipStatusHandler, GetMembershipStatusQuery, GetMembershipStatusResult,
};
pub use list_members::{ListMembersHandler, ListMembersQuery};
pub use list_waiting_members::{ListWaitingMembersHandler, ListWaitingMembersQuery};
pub use reject_member::{RejectMemberCommand, RejectMemberHandler};
pub use remove_member::{RemoveMemberCommand, RemoveMemberHandler, RemoveMemberResult};
pub use request_join::{RequestJoinCommand, RequestJoinHandler, RequestJoinResult};
pub use update_member_role::{
    UpdateMemberRoleCommand, UpdateMemberRoleHandler, UpdateMemberRoleResult,
};
pub use withdraw_membership::{WithdrawMembershipCommand, WithdrawMembershipHandler};
