//! Wire DTOs shared across HTTP handlers.
//!
//! Domain entities never serialise directly; each response shape here is an
//! explicit projection so the storage model and the wire contract can evolve
//! independently.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::event::CalendarEvent;
use crate::domain::idea::{Idea, IdeaStatus, IdeaWithPeople};
use crate::domain::notification::{Notification, NotificationKind};
use crate::domain::todo::Todo;
use crate::domain::user::{Email, PublicProfile, Role, UserId};
use crate::domain::User;

/// Deserializer distinguishing an absent key from an explicit `null`.
///
/// Pair with `#[serde(default)]`: an absent key stays `None`, `null` becomes
/// `Some(None)`, and a value becomes `Some(Some(value))`.
pub fn explicit_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Authenticated user projection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// Stable identifier.
    #[schema(value_type = String)]
    pub id: UserId,
    /// Login email.
    #[schema(value_type = String)]
    pub email: Email,
    /// Portal role.
    pub role: Role,
    /// Deactivated users cannot authenticate.
    pub is_active: bool,
    /// Optional avatar image URL.
    pub avatar_url: Option<String>,
    /// Optional free-text biography.
    pub bio: Option<String>,
    /// Optional GitHub profile link.
    pub github_link: Option<String>,
    /// Optional LinkedIn profile link.
    pub linkedin_link: Option<String>,
    /// Optional studio or team name.
    pub studio_name: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
            avatar_url: user.avatar_url,
            bio: user.bio,
            github_link: user.github_link,
            linkedin_link: user.linkedin_link,
            studio_name: user.studio_name,
        }
    }
}

/// Idea projection mirroring the stored record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IdeaResponse {
    /// Stable identifier.
    pub id: Uuid,
    /// Submitting user.
    #[schema(value_type = String)]
    pub user_id: UserId,
    /// Short title.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Free-form category label.
    pub category: String,
    /// Stored attachment path, when one was uploaded.
    pub file_path: Option<String>,
    /// Review status.
    pub status: IdeaStatus,
    /// Comment left by the evaluating admin.
    pub admin_comment: Option<String>,
    /// Admin who evaluated the idea.
    #[schema(value_type = Option<String>)]
    pub reviewed_by_id: Option<UserId>,
    /// Opaque tag text.
    pub tags: Option<String>,
    /// Optional problem statement.
    pub problem_statement: Option<String>,
    /// Optional proposed solution.
    pub solution: Option<String>,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Idea> for IdeaResponse {
    fn from(idea: Idea) -> Self {
        Self {
            id: idea.id,
            user_id: idea.owner_id,
            title: idea.title,
            description: idea.description,
            category: idea.category,
            file_path: idea.file_path,
            status: idea.status,
            admin_comment: idea.admin_comment,
            reviewed_by_id: idea.reviewer_id,
            tags: idea.tags,
            problem_statement: idea.problem_statement,
            solution: idea.solution,
            created_at: idea.created_at,
        }
    }
}

/// Idea projection with owner and reviewer identities attached.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IdeaDetailResponse {
    /// The idea record.
    #[serde(flatten)]
    pub idea: IdeaResponse,
    /// Public profile of the submitting user.
    pub owner: Option<PublicProfile>,
    /// Public profile of the evaluating admin, if evaluated.
    pub reviewer: Option<PublicProfile>,
}

impl From<IdeaWithPeople> for IdeaDetailResponse {
    fn from(value: IdeaWithPeople) -> Self {
        Self {
            idea: value.idea.into(),
            owner: value.owner,
            reviewer: value.reviewer,
        }
    }
}

/// Todo projection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TodoResponse {
    /// Stable identifier.
    pub id: Uuid,
    /// Owning user.
    #[schema(value_type = String)]
    pub user_id: UserId,
    /// Short title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Optional date label.
    pub date: Option<String>,
    /// Optional start time.
    pub start_time: Option<String>,
    /// Optional end time.
    pub end_time: Option<String>,
    /// Opaque tag text.
    pub tags: Option<String>,
    /// Assigning admin, when created on the owner's behalf.
    #[schema(value_type = Option<String>)]
    pub assigned_by: Option<UserId>,
    /// Completion flag.
    pub done: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            user_id: todo.owner_id,
            title: todo.title,
            description: todo.description,
            date: todo.date,
            start_time: todo.start_time,
            end_time: todo.end_time,
            tags: todo.tags,
            assigned_by: todo.assigned_by,
            done: todo.done,
            created_at: todo.created_at,
        }
    }
}

/// Calendar event projection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventResponse {
    /// Stable identifier.
    pub id: Uuid,
    /// Owning user.
    #[schema(value_type = String)]
    pub user_id: UserId,
    /// Short title.
    pub title: String,
    /// Date label, `YYYY-MM-DD`.
    pub date: String,
    /// Optional time label.
    pub time: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// Display colour.
    pub color: String,
}

impl From<CalendarEvent> for EventResponse {
    fn from(event: CalendarEvent) -> Self {
        Self {
            id: event.id,
            user_id: event.owner_id,
            title: event.title,
            date: event.date,
            time: event.time,
            description: event.description,
            color: event.color,
        }
    }
}

/// Notification projection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationResponse {
    /// Stable identifier.
    pub id: Uuid,
    /// Recipient user.
    #[schema(value_type = String)]
    pub user_id: UserId,
    /// Rendered message text.
    pub message: String,
    /// Notification category.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Read flag.
    pub is_read: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id,
            user_id: notification.recipient_id,
            message: notification.message,
            kind: notification.kind,
            is_read: notification.is_read,
            created_at: notification.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Default, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "explicit_option")]
        bio: Option<Option<String>>,
    }

    #[test]
    fn explicit_option_distinguishes_absent_null_and_value() {
        let absent: Patch = serde_json::from_str("{}").expect("parses");
        assert_eq!(absent.bio, None);

        let null: Patch = serde_json::from_str(r#"{"bio":null}"#).expect("parses");
        assert_eq!(null.bio, Some(None));

        let value: Patch = serde_json::from_str(r#"{"bio":"X"}"#).expect("parses");
        assert_eq!(value.bio, Some(Some("X".to_owned())));
    }

    #[test]
    fn notification_kind_serializes_under_the_type_key() {
        let rendered = serde_json::to_value(NotificationResponse {
            id: Uuid::new_v4(),
            user_id: UserId::random(),
            message: "hello".to_owned(),
            kind: NotificationKind::TaskAssigned,
            is_read: false,
            created_at: Utc::now(),
        })
        .expect("serializes");
        assert_eq!(
            rendered.get("type"),
            Some(&serde_json::json!("task_assigned"))
        );
    }
}
