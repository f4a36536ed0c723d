//! MembershipEngine - the membership operations behind one facade.
//!
//! Each method takes the club, the target and the acting member explicitly.
//! Nothing is read from ambient session state: the request surface
//! authenticates the caller and passes the member ID in.

use std::sync::Arc;

use crate::domain::foundation::{ClubId, MemberId};
use crate::domain::membership::{
    ClubLinks, ClubRole, Membership, MembershipError, MembershipStatus, NotificationComposer,
};
use crate::ports::{ClubDirectory, MembershipRepository, Notifier};

use super::handlers::{
    ApproveMemberCommand, ApproveMemberHandler, ApproveMemberResult, ClubCapacity,
    FoundClubCommand, FoundClubHandler, GetClubCapacityHandler, GetClubCapacityQuery,
    GetMembershipStatusHandler, GetMembershipStatusQuery, ListMembersHandler, ListMembersQuery,
    ListWaitingMembersHandler, ListWaitingMembersQuery, RejectMemberCommand, RejectMemberHandler,
    RemoveMemberCommand, RemoveMemberHandler, RemoveMemberResult, RequestJoinCommand,
    RequestJoinHandler, RequestJoinResult, UpdateMemberRoleCommand, UpdateMemberRoleHandler,
    UpdateMemberRoleResult, WithdrawMembershipCommand, WithdrawMembershipHandler,
};

/// Club membership state engine.
///
/// Stateless apart from its ports; clone the `Arc`s and share one engine
/// across request tasks.
///
/// # Example
///
/// ```ignore
/// let engine = MembershipEngine::new(repository, directory, notifier, ClubLinks::default());
/// engine.request_join(club_id, bob.clone()).await?;
/// engine.approve(club_id, bob, leader).await?;
/// ```
pub struct MembershipEngine {
    request_join: RequestJoinHandler,
    approve: ApproveMemberHandler,
    reject: RejectMemberHandler,
    update_role: UpdateMemberRoleHandler,
    remove: RemoveMemberHandler,
    withdraw: WithdrawMembershipHandler,
    found_club: FoundClubHandler,
    status: GetMembershipStatusHandler,
    list_members: ListMembersHandler,
    list_waiting: ListWaitingMembersHandler,
    capacity: GetClubCapacityHandler,
}

impl MembershipEngine {
    pub fn new(
        repository: Arc<dyn MembershipRepository>,
        directory: Arc<dyn ClubDirectory>,
        notifier: Arc<dyn Notifier>,
        links: ClubLinks,
    ) -> Self {
        let composer = NotificationComposer::new(links);
        Self {
            request_join: RequestJoinHandler::new(
                repository.clone(),
                directory.clone(),
                notifier.clone(),
                composer.clone(),
            ),
            approve: ApproveMemberHandler::new(
                repository.clone(),
                directory.clone(),
                notifier.clone(),
                composer.clone(),
            ),
            reject: RejectMemberHandler::new(
                repository.clone(),
                directory.clone(),
                notifier.clone(),
                composer.clone(),
            ),
            update_role: UpdateMemberRoleHandler::new(
                repository.clone(),
                directory.clone(),
                notifier.clone(),
                composer.clone(),
            ),
            remove: RemoveMemberHandler::new(
                repository.clone(),
                directory.clone(),
                notifier.clone(),
                composer.clone(),
            ),
            withdraw: WithdrawMembershipHandler::new(
                repository.clone(),
                directory.clone(),
                notifier,
                composer,
            ),
            found_club: FoundClubHandler::new(repository.clone(), directory.clone()),
            status: GetMembershipStatusHandler::new(repository.clone()),
            list_members: ListMembersHandler::new(repository.clone(), directory.clone()),
            list_waiting: ListWaitingMembersHandler::new(repository.clone(), directory.clone()),
            capacity: GetClubCapacityHandler::new(repository, directory),
        }
    }

    // === Commands ===

    /// Seats the founder of a newly created club as its leader.
    pub async fn found_club(
        &self,
        club_id: ClubId,
        founder: MemberId,
    ) -> Result<Membership, MembershipError> {
        self.found_club
            .handle(FoundClubCommand { club_id, founder })
            .await
    }

    pub async fn request_join(
        &self,
        club_id: ClubId,
        applicant: MemberId,
    ) -> Result<RequestJoinResult, MembershipError> {
        self.request_join
            .handle(RequestJoinCommand { club_id, applicant })
            .await
    }

    pub async fn approve(
        &self,
        club_id: ClubId,
        target: MemberId,
        actor: MemberId,
    ) -> Result<ApproveMemberResult, MembershipError> {
        self.approve
            .handle(ApproveMemberCommand {
                club_id,
                target,
                actor,
            })
            .await
    }

    pub async fn reject(
        &self,
        club_id: ClubId,
        target: MemberId,
        actor: MemberId,
        reason: impl Into<String>,
    ) -> Result<(), MembershipError> {
        self.reject
            .handle(RejectMemberCommand {
                club_id,
                target,
                actor,
                reason: reason.into(),
            })
            .await
    }

    pub async fn update_role(
        &self,
        club_id: ClubId,
        target: MemberId,
        actor: MemberId,
        new_role: ClubRole,
    ) -> Result<UpdateMemberRoleResult, MembershipError> {
        self.update_role
            .handle(UpdateMemberRoleCommand {
                club_id,
                target,
                actor,
                new_role,
            })
            .await
    }

    /// Expels (`allow_rejoin`) or blocks an approved member.
    pub async fn remove(
        &self,
        club_id: ClubId,
        target: MemberId,
        actor: MemberId,
        reason: impl Into<String>,
        allow_rejoin: bool,
    ) -> Result<RemoveMemberResult, MembershipError> {
        self.remove
            .handle(RemoveMemberCommand {
                club_id,
                target,
                actor,
                reason: reason.into(),
                allow_rejoin,
            })
            .await
    }

    pub async fn withdraw(
        &self,
        club_id: ClubId,
        member_id: MemberId,
    ) -> Result<(), MembershipError> {
        self.withdraw
            .handle(WithdrawMembershipCommand { club_id, member_id })
            .await
    }

    // === Queries ===

    pub async fn get_status(
        &self,
        club_id: ClubId,
        member_id: MemberId,
    ) -> Result<Option<MembershipStatus>, MembershipError> {
        self.status
            .handle(GetMembershipStatusQuery { club_id, member_id })
            .await
    }

    pub async fn list_members(
        &self,
        club_id: ClubId,
        actor: MemberId,
    ) -> Result<Vec<Membership>, MembershipError> {
        self.list_members
            .handle(ListMembersQuery { club_id, actor })
            .await
    }

    pub async fn list_waiting(
        &self,
        club_id: ClubId,
        actor: MemberId,
    ) -> Result<Vec<Membership>, MembershipError> {
        self.list_waiting
            .handle(ListWaitingMembersQuery { club_id, actor })
            .await
    }

    pub async fn capacity(
        &self,
        club_id: ClubId,
        actor: MemberId,
    ) -> Result<ClubCapacity, MembershipError> {
        self.capacity
            .handle(GetClubCapacityQuery { club_id, actor })
            .await
    }
}
