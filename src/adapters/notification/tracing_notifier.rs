//! Notifier that writes each notification to the tracing log.
//!
//! Stand-in for a real delivery channel (push, e-mail, in-app inbox) when
//! none is wired.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::membership::Notification;
use crate::ports::Notifier;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for TracingNotifier {
    async fn send(&self, notification: Notification) -> Result<(), DomainError> {
        tracing::info!(
            receiver_id = %notification.receiver_id,
            actor_id = %notification.actor_id,
            link_url = %notification.link_url,
            title = %notification.title,
            "{}",
            notification.content
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::MemberId;

    #[tokio::test]
    async fn send_always_succeeds() {
        let notification = Notification {
            receiver_id: MemberId::new("a").unwrap(),
            title: "Join request approved".to_string(),
            content: "Your request to join Chess Club has been approved.".to_string(),
            link_url: "/clubs/1/dashboard".to_string(),
            actor_id: MemberId::new("leader").unwrap(),
        };
        assert!(TracingNotifier::new().send(notification).await.is_ok());
    }
}
