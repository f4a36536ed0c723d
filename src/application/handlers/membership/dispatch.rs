//! Best-effort notification delivery.
//!
//! Runs after the membership change has committed. Failures are logged and
//! dropped; they never reach the caller.

use futures::future::join_all;

use crate::domain::foundation::ClubId;
use crate::domain::membership::{Notification, FALLBACK_CLUB_NAME};
use crate::ports::{ClubDirectory, Notifier};

pub(crate) async fn notify_best_effort(notifier: &dyn Notifier, notification: Notification) {
    let receiver = notification.receiver_id.clone();
    if let Err(err) = notifier.send(notification).await {
        tracing::warn!(receiver_id = %receiver, error = %err, "notification delivery failed");
    }
}

/// Delivers all notifications concurrently. Each failure is logged on its own.
pub(crate) async fn notify_all(notifier: &dyn Notifier, notifications: Vec<Notification>) {
    join_all(
        notifications
            .into_iter()
            .map(|notification| notify_best_effort(notifier, notification)),
    )
    .await;
}

/// Club name for notification text, or the generic fallback.
pub(crate) async fn club_name(directory: &dyn ClubDirectory, club_id: &ClubId) -> String {
    match directory.find_club(club_id).await {
        Ok(Some(club)) => club.name,
        Ok(None) => FALLBACK_CLUB_NAME.to_string(),
        Err(err) => {
            tracing::warn!(club_id = %club_id, error = %err, "club name lookup failed");
            FALLBACK_CLUB_NAME.to_string()
        }
    }
}
