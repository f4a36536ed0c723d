//! Recording notifier for tests.
//!
//! Captures every notification for later assertions and can be switched to
//! fail every delivery, to check that delivery failures never undo a
//! membership transition.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, MemberId};
use crate::domain::membership::Notification;
use crate::ports::Notifier;

/// In-memory notifier.
///
/// # Example
///
/// ```ignore
/// let notifier = Arc::new(InMemoryNotifier::new());
/// // ... run a transition ...
/// assert_eq!(notifier.sent_to(&applicant).await.len(), 1);
/// ```
#[derive(Default)]
pub struct InMemoryNotifier {
    sent: RwLock<Vec<Notification>>,
    fail_delivery: bool,
}

impl InMemoryNotifier {
    /// Creates a notifier that records every notification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a notifier whose every delivery fails.
    pub fn failing() -> Self {
        Self {
            sent: RwLock::new(Vec::new()),
            fail_delivery: true,
        }
    }

    // === Test Helpers ===

    /// All delivered notifications, in delivery order.
    pub async fn sent(&self) -> Vec<Notification> {
        self.sent.read().await.clone()
    }

    /// Notifications delivered to one member.
    pub async fn sent_to(&self, receiver: &MemberId) -> Vec<Notification> {
        self.sent
            .read()
            .await
            .iter()
            .filter(|n| n.receiver_id == *receiver)
            .cloned()
            .collect()
    }

    /// Number of delivered notifications.
    pub async fn count(&self) -> usize {
        self.sent.read().await.len()
    }

    /// Forget everything delivered so far.
    pub async fn clear(&self) {
        self.sent.write().await.clear();
    }
}

#[async_trait]
impl Notifier for InMemoryNotifier {
    async fn send(&self, notification: Notification) -> Result<(), DomainError> {
        if self.fail_delivery {
            return Err(DomainError::new(
                ErrorCode::NotificationFailed,
                "Simulated delivery failure",
            ));
        }
        self.sent.write().await.push(notification);
        Ok(())
    }
}
