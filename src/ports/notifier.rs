//! Notifier port - fire-and-forget delivery of membership notifications.
//!
//! The engine calls `send` only after a transition has committed. A failed
//! delivery is logged by the caller and never undoes the transition.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::membership::Notification;

/// Port for delivering notifications to members.
///
/// Delivery is best-effort: no retry, no outbox.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: Notification) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn Notifier) {}
}
