//! Notifications produced by membership transitions.
//!
//! The engine describes *what* to tell whom; delivery is the notifier
//! adapter's business.

use crate::domain::foundation::{ClubId, MemberId};
use serde::{Deserialize, Serialize};

use super::ClubRole;

/// Name used in notification text when the club's name can't be resolved.
pub const FALLBACK_CLUB_NAME: &str = "the club";

/// A single message for a single receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub receiver_id: MemberId,
    pub title: String,
    pub content: String,
    pub link_url: String,

    /// The member whose action triggered the message.
    pub actor_id: MemberId,
}

/// Builds in-app links to club pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClubLinks {
    prefix: String,
}

impl ClubLinks {
    /// Creates links under `prefix` (e.g. `/clubs`). A trailing slash is ignored.
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            prefix: prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Roster page, where staff handle requests.
    pub fn members(&self, club_id: &ClubId) -> String {
        format!("{}/{}/members", self.prefix, club_id)
    }

    /// Members-only landing page.
    pub fn dashboard(&self, club_id: &ClubId) -> String {
        format!("{}/{}/dashboard", self.prefix, club_id)
    }

    /// Public club page.
    pub fn detail(&self, club_id: &ClubId) -> String {
        format!("{}/{}/detail", self.prefix, club_id)
    }
}

impl Default for ClubLinks {
    fn default() -> Self {
        Self::new("/clubs")
    }
}

/// Composes the notification for each membership transition.
#[derive(Debug, Clone, Default)]
pub struct NotificationComposer {
    links: ClubLinks,
}

impl NotificationComposer {
    pub fn new(links: ClubLinks) -> Self {
        Self { links }
    }

    /// Tells a staff member a new join request is waiting.
    pub fn join_requested(
        &self,
        club_id: &ClubId,
        club_name: &str,
        staff: MemberId,
        applicant: &MemberId,
    ) -> Notification {
        Notification {
            receiver_id: staff,
            title: "New join request".to_string(),
            content: format!(
                "A new member has applied to join {}. Please approve or reject the request.",
                club_name
            ),
            link_url: self.links.members(club_id),
            actor_id: applicant.clone(),
        }
    }

    pub fn approved(
        &self,
        club_id: &ClubId,
        club_name: &str,
        target: MemberId,
        actor: &MemberId,
    ) -> Notification {
        Notification {
            receiver_id: target,
            title: "Join request approved".to_string(),
            content: format!("Your request to join {} has been approved.", club_name),
            link_url: self.links.dashboard(club_id),
            actor_id: actor.clone(),
        }
    }

    pub fn rejected(
        &self,
        club_id: &ClubId,
        club_name: &str,
        target: MemberId,
        actor: &MemberId,
        reason: &str,
    ) -> Notification {
        Notification {
            receiver_id: target,
            title: "Join request rejected".to_string(),
            content: format!(
                "Your request to join {} was rejected. Reason: {}",
                club_name, reason
            ),
            link_url: self.links.detail(club_id),
            actor_id: actor.clone(),
        }
    }

    pub fn role_changed(
        &self,
        club_id: &ClubId,
        club_name: &str,
        target: MemberId,
        actor: &MemberId,
        role: ClubRole,
    ) -> Notification {
        Notification {
            receiver_id: target,
            title: "Your role has changed".to_string(),
            content: format!("You are now a {} of {}.", role.display_name(), club_name),
            link_url: self.links.dashboard(club_id),
            actor_id: actor.clone(),
        }
    }

    pub fn removed(
        &self,
        club_id: &ClubId,
        club_name: &str,
        target: MemberId,
        actor: &MemberId,
        reason: &str,
        allow_rejoin: bool,
    ) -> Notification {
        let rejoin = if allow_rejoin {
            "You may apply to join again."
        } else {
            "You may not rejoin this club."
        };
        Notification {
            receiver_id: target,
            title: "Removed from club".to_string(),
            content: format!(
                "You have been removed from {}. Reason: {} {}",
                club_name, reason, rejoin
            ),
            link_url: self.links.detail(club_id),
            actor_id: actor.clone(),
        }
    }

    /// Tells the leader a member has left.
    pub fn withdrew(
        &self,
        club_id: &ClubId,
        club_name: &str,
        leader: MemberId,
        member: &MemberId,
    ) -> Notification {
        Notification {
            receiver_id: leader,
            title: "A member has left".to_string(),
            content: format!("{} - {} has left the club.", club_name, member),
            link_url: self.links.members(club_id),
            actor_id: member.clone(),
        }
    }
}
