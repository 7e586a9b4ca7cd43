//! Notification feed use-cases: list recent and bulk mark-read.

use std::sync::Arc;

use crate::domain::notification::Notification;
use crate::domain::ports::{NotificationPersistenceError, NotificationRepository};
use crate::domain::user::UserId;
use crate::domain::Error;

/// Default feed size when the client does not supply a limit.
pub const DEFAULT_FEED_LIMIT: i64 = 20;

/// Notification feed service.
#[derive(Clone)]
pub struct NotificationService {
    notifications: Arc<dyn NotificationRepository>,
}

fn map_notification_error(error: NotificationPersistenceError) -> Error {
    match error {
        NotificationPersistenceError::Connection { message } => {
            Error::service_unavailable(message)
        }
        NotificationPersistenceError::Query { message } => Error::internal(message),
    }
}

impl NotificationService {
    /// Create the service over its port.
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    /// Most recent notifications for the caller, newest first.
    pub async fn list(
        &self,
        caller: &UserId,
        limit: Option<i64>,
    ) -> Result<Vec<Notification>, Error> {
        let limit = limit.unwrap_or(DEFAULT_FEED_LIMIT).max(0);
        self.notifications
            .list_recent(caller, limit)
            .await
            .map_err(map_notification_error)
    }

    /// Flip every unread row for the caller. Idempotent: a second call finds
    /// nothing unread and still succeeds.
    pub async fn mark_all_read(&self, caller: &UserId) -> Result<u64, Error> {
        self.notifications
            .mark_all_read(caller)
            .await
            .map_err(map_notification_error)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::domain::notification::NotificationKind;
    use crate::domain::ports::NewNotification;
    use crate::test_support::InMemoryNotifications;

    async fn feed_with(count: usize) -> (NotificationService, UserId) {
        let repo = Arc::new(InMemoryNotifications::default());
        let recipient = UserId::random();
        for index in 0..count {
            repo.insert(NewNotification {
                id: Uuid::new_v4(),
                recipient_id: recipient,
                message: format!("message {index}"),
                kind: NotificationKind::TaskAssigned,
            })
            .await
            .expect("insert succeeds");
        }
        (NotificationService::new(repo), recipient)
    }

    #[tokio::test]
    async fn feed_is_newest_first_and_bounded() {
        let (service, recipient) = feed_with(25).await;
        let feed = service
            .list(&recipient, None)
            .await
            .expect("listing succeeds");
        assert_eq!(feed.len() as i64, DEFAULT_FEED_LIMIT);
        assert_eq!(feed[0].message, "message 24");

        let small = service
            .list(&recipient, Some(5))
            .await
            .expect("listing succeeds");
        assert_eq!(small.len(), 5);
    }

    #[tokio::test]
    async fn mark_all_read_is_idempotent() {
        let (service, recipient) = feed_with(3).await;
        let flipped = service
            .mark_all_read(&recipient)
            .await
            .expect("first pass succeeds");
        assert_eq!(flipped, 3);
        let again = service
            .mark_all_read(&recipient)
            .await
            .expect("second pass succeeds");
        assert_eq!(again, 0);

        let feed = service
            .list(&recipient, None)
            .await
            .expect("listing succeeds");
        assert!(feed.iter().all(|n| n.is_read));
    }

    #[tokio::test]
    async fn other_recipients_are_untouched() {
        let repo = Arc::new(InMemoryNotifications::default());
        let a = UserId::random();
        let b = UserId::random();
        for recipient in [a, b] {
            repo.insert(NewNotification {
                id: Uuid::new_v4(),
                recipient_id: recipient,
                message: "hello".to_owned(),
                kind: NotificationKind::NewIdea,
            })
            .await
            .expect("insert succeeds");
        }
        let service = NotificationService::new(repo);
        service.mark_all_read(&a).await.expect("mark succeeds");
        let feed_b = service.list(&b, None).await.expect("listing succeeds");
        assert!(feed_b.iter().all(|n| !n.is_read));
    }
}
