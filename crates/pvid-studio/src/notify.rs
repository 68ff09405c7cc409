//! User-facing notifications.
//!
//! Notifications are fire-and-forget: there is no acknowledgement channel
//! and delivery failures are never reported to the emitter.

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

/// A toast-style message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success | NotificationLevel::Info => {
                info!(level = ?notification.level, "{}", notification.message)
            }
            NotificationLevel::Error => error!("{}", notification.message),
        }
    }
}

/// Shared in-memory record of every notification, for UI polling.
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    entries: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications, oldest first.
    pub fn entries(&self) -> Vec<Notification> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, notification: Notification) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

/// Fans notifications out to any number of UI subscribers.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    sender: broadcast::Sender<Notification>,
}

impl BroadcastNotifier {
    /// Create a notifier buffering up to `capacity` undelivered messages
    /// per subscriber; slow subscribers lose the oldest ones.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new(32)
    }
}

impl Notifier for BroadcastNotifier {
    fn notify(&self, notification: Notification) {
        if let Err(e) = self.sender.send(notification) {
            debug!("No notification subscribers: {}", e.0.message);
        }
    }
}

/// Sends each notification to several notifiers.
#[derive(Default)]
pub struct FanoutNotifier {
    targets: Vec<Arc<dyn Notifier>>,
}

impl FanoutNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, target: Arc<dyn Notifier>) -> Self {
        self.targets.push(target);
        self
    }
}

impl Notifier for FanoutNotifier {
    fn notify(&self, notification: Notification) {
        match self.targets.split_last() {
            Some((last, rest)) => {
                for target in rest {
                    target.notify(notification.clone());
                }
                last.notify(notification);
            }
            None => warn!("Notification dropped, no targets: {}", notification.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_log_records_in_order() {
        let log = NotificationLog::new();
        let shared = log.clone();

        shared.notify(Notification::info("Previous progress restored"));
        shared.notify(Notification::success("Progress reset"));

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].level, NotificationLevel::Info);
        assert_eq!(log.last(), Some(Notification::success("Progress reset")));

        assert_eq!(log.drain().len(), 2);
        assert!(log.is_empty());
    }

    #[tokio::test]
    async fn test_broadcast_delivers_to_subscribers() {
        let notifier = BroadcastNotifier::new(8);
        let mut rx = notifier.subscribe();
        assert_eq!(notifier.subscriber_count(), 1);

        notifier.notify(Notification::error("Upload failed"));

        let received = rx.recv().await.unwrap();
        assert_eq!(received, Notification::error("Upload failed"));
    }

    #[test]
    fn test_broadcast_without_subscribers_is_silent() {
        let notifier = BroadcastNotifier::default();
        notifier.notify(Notification::info("nobody listening"));
    }

    #[test]
    fn test_fanout() {
        let a = Arc::new(NotificationLog::new());
        let b = Arc::new(NotificationLog::new());
        let fanout = FanoutNotifier::new().with(a.clone()).with(b.clone());

        fanout.notify(Notification::success("Saved"));

        assert_eq!(a.len(), 1);
        assert_eq!(b.last(), Some(Notification::success("Saved")));
    }

    #[test]
    fn test_serialized_level() {
        let json = serde_json::to_value(Notification::success("ok")).unwrap();
        assert_eq!(json["level"], "success");
    }
}
