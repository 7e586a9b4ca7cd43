//! Port abstraction for notification persistence adapters.
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::notification::{Notification, NotificationKind};
use crate::domain::user::UserId;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by notification repository adapters.
    pub enum NotificationPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "notification repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "notification repository query failed: {message}",
    }
}

/// Fields required to append a notification row.
#[derive(Debug, Clone)]
pub struct NewNotification {
    /// Identifier generated by the caller.
    pub id: Uuid,
    /// Recipient user.
    pub recipient_id: UserId,
    /// Rendered message text.
    pub message: String,
    /// Notification category.
    pub kind: NotificationKind,
}

/// Driven port for the append-only notification feed.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Append an unread notification.
    async fn insert(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, NotificationPersistenceError>;

    /// Most recent notifications for a recipient, newest first.
    async fn list_recent(
        &self,
        recipient: &UserId,
        limit: i64,
    ) -> Result<Vec<Notification>, NotificationPersistenceError>;

    /// Flip every unread row for the recipient; returns how many changed.
    async fn mark_all_read(&self, recipient: &UserId)
    -> Result<u64, NotificationPersistenceError>;
}
