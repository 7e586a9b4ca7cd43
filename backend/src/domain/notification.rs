//! Notification entity for the pull-based per-user feed.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::UserId;

/// Notification category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// An idea owned by the recipient was reviewed.
    IdeaReview,
    /// An admin assigned the recipient a todo.
    TaskAssigned,
    /// A new idea arrived for review.
    NewIdea,
}

impl NotificationKind {
    /// Stable string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IdeaReview => "idea_review",
            Self::TaskAssigned => "task_assigned",
            Self::NewIdea => "new_idea",
        }
    }

    /// Parse the stored string form.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "idea_review" => Some(Self::IdeaReview),
            "task_assigned" => Some(Self::TaskAssigned),
            "new_idea" => Some(Self::NewIdea),
            _ => None,
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted notification row; append-only apart from the read flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Stable identifier.
    pub id: Uuid,
    /// Recipient user.
    pub recipient_id: UserId,
    /// Rendered message text.
    pub message: String,
    /// Notification category.
    pub kind: NotificationKind,
    /// Read flag; flipped in bulk by the recipient.
    pub is_read: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Render the task-assignment message shown to the assignee.
#[must_use]
pub fn task_assigned_message(title: &str, admin_email: &str) -> String {
    format!("You've been assigned a new task: '{title}' by {admin_email}.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips() {
        for kind in [
            NotificationKind::IdeaReview,
            NotificationKind::TaskAssigned,
            NotificationKind::NewIdea,
        ] {
            assert_eq!(NotificationKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(NotificationKind::parse("broadcast"), None);
    }

    #[test]
    fn task_assignment_message_shape() {
        assert_eq!(
            task_assigned_message("Prepare slides", "admin@example.com"),
            "You've been assigned a new task: 'Prepare slides' by admin@example.com."
        );
    }
}
