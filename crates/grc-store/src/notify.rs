//! # Notification Sink
//!
//! The core emits fire-and-forget notification requests; delivery is an
//! external collaborator. Sinks must not block the caller.

use std::sync::Mutex;

use grc_core::UserId;

/// Who a notification addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// A tenant user.
    User(UserId),
    /// The operator channel (starvation warnings, persistence failures).
    Operator,
}

/// A fire-and-forget notification request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Where to deliver.
    pub recipient: Recipient,
    /// Human-readable message.
    pub message: String,
}

impl Notification {
    /// A notification to a tenant user.
    pub fn user(id: UserId, message: impl Into<String>) -> Self {
        Self {
            recipient: Recipient::User(id),
            message: message.into(),
        }
    }

    /// A notification to the operator channel.
    pub fn operator(message: impl Into<String>) -> Self {
        Self {
            recipient: Recipient::Operator,
            message: message.into(),
        }
    }
}

/// Delivery interface. Implementations must return promptly; anything
/// slow belongs behind a queue on the implementation side.
pub trait NotificationSink: Send + Sync {
    /// Accept one notification for delivery.
    fn notify(&self, notification: Notification);
}

/// Discards every notification.
#[derive(Debug, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _notification: Notification) {}
}

/// Records notifications in memory. Test support.
#[derive(Debug, Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    /// An empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications accepted so far.
    pub fn sent(&self) -> Vec<Notification> {
        match self.sent.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        match self.sent.lock() {
            Ok(mut guard) => guard.push(notification),
            Err(poisoned) => poisoned.into_inner().push(notification),
        }
    }
}
