//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::event::CalendarEvent;
use crate::domain::idea::{Idea, IdeaStatus};
use crate::domain::notification::{Notification, NotificationKind};
use crate::domain::todo::{Todo, TodoPatch};
use crate::domain::user::{Email, ProfileUpdate, Role, User, UserId};

use super::schema::{access_tokens, calendar_events, ideas, notifications, todos, users};

/// Raised when a stored string column no longer parses into its domain enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("corrupt {table} row {id}: unrecognised {column} value {value:?}")]
pub(crate) struct CorruptRow {
    pub table: &'static str,
    pub column: &'static str,
    pub id: Uuid,
    pub value: String,
}

// ---------------------------------------------------------------------------
// users
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub github_link: Option<String>,
    pub linkedin_link: Option<String>,
    pub studio_name: Option<String>,
    #[expect(dead_code, reason = "schema field read for completeness; audit only")]
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub(crate) fn into_domain(self) -> Result<User, CorruptRow> {
        let role = Role::parse(&self.role).map_err(|_| CorruptRow {
            table: "users",
            column: "role",
            id: self.id,
            value: self.role.clone(),
        })?;
        let email = Email::new(self.email.clone()).map_err(|_| CorruptRow {
            table: "users",
            column: "email",
            id: self.id,
            value: self.email.clone(),
        })?;
        Ok(User {
            id: UserId::from_uuid(self.id),
            email,
            password_hash: self.password_hash,
            role,
            is_active: self.is_active,
            avatar_url: self.avatar_url,
            bio: self.bio,
            github_link: self.github_link,
            linkedin_link: self.linkedin_link,
            studio_name: self.studio_name,
        })
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
}

/// Changeset applying a field-presence profile patch.
///
/// Diesel's double-`Option` semantics mirror the domain contract exactly:
/// outer `None` skips the column, `Some(None)` writes SQL `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct ProfileChangeset<'a> {
    pub avatar_url: Option<Option<&'a str>>,
    pub bio: Option<Option<&'a str>>,
    pub github_link: Option<Option<&'a str>>,
    pub linkedin_link: Option<Option<&'a str>>,
    pub studio_name: Option<Option<&'a str>>,
}

fn as_column<'a>(field: &'a Option<Option<String>>) -> Option<Option<&'a str>> {
    field
        .as_ref()
        .map(|value| value.as_ref().map(String::as_str))
}

impl<'a> ProfileChangeset<'a> {
    pub(crate) fn from_patch(patch: &'a ProfileUpdate) -> Self {
        Self {
            avatar_url: as_column(&patch.avatar_url),
            bio: as_column(&patch.bio),
            github_link: as_column(&patch.github_link),
            linkedin_link: as_column(&patch.linkedin_link),
            studio_name: as_column(&patch.studio_name),
        }
    }
}

// ---------------------------------------------------------------------------
// ideas
// ---------------------------------------------------------------------------

/// Row struct for reading from the ideas table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ideas)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IdeaRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub file_path: Option<String>,
    pub status: String,
    pub admin_comment: Option<String>,
    pub reviewed_by_id: Option<Uuid>,
    pub tags: Option<String>,
    pub problem_statement: Option<String>,
    pub solution: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl IdeaRow {
    pub(crate) fn into_domain(self) -> Result<Idea, CorruptRow> {
        let status = IdeaStatus::parse(&self.status).ok_or_else(|| CorruptRow {
            table: "ideas",
            column: "status",
            id: self.id,
            value: self.status.clone(),
        })?;
        Ok(Idea {
            id: self.id,
            owner_id: UserId::from_uuid(self.user_id),
            title: self.title,
            description: self.description,
            category: self.category,
            file_path: self.file_path,
            status,
            admin_comment: self.admin_comment,
            reviewer_id: self.reviewed_by_id.map(UserId::from_uuid),
            tags: self.tags,
            problem_statement: self.problem_statement,
            solution: self.solution,
            created_at: self.created_at,
        })
    }
}

/// Insertable struct for creating new idea records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ideas)]
pub(crate) struct NewIdeaRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub file_path: Option<&'a str>,
    pub status: &'a str,
    pub tags: Option<&'a str>,
    pub problem_statement: Option<&'a str>,
    pub solution: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// todos
// ---------------------------------------------------------------------------

/// Row struct for reading from the todos table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = todos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TodoRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub tags: Option<String>,
    pub assigned_by: Option<Uuid>,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

impl TodoRow {
    pub(crate) fn into_domain(self) -> Todo {
        Todo {
            id: self.id,
            owner_id: UserId::from_uuid(self.user_id),
            title: self.title,
            description: self.description,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            tags: self.tags,
            assigned_by: self.assigned_by.map(UserId::from_uuid),
            done: self.done,
            created_at: self.created_at,
        }
    }
}

/// Insertable struct for creating new todo records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = todos)]
pub(crate) struct NewTodoRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub date: Option<&'a str>,
    pub start_time: Option<&'a str>,
    pub end_time: Option<&'a str>,
    pub tags: Option<&'a str>,
    pub assigned_by: Option<Uuid>,
}

/// Changeset applying a field-presence todo patch.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = todos)]
pub(crate) struct TodoChangeset<'a> {
    pub title: Option<&'a str>,
    pub description: Option<Option<&'a str>>,
    pub date: Option<Option<&'a str>>,
    pub start_time: Option<Option<&'a str>>,
    pub end_time: Option<Option<&'a str>>,
    pub tags: Option<Option<&'a str>>,
    pub done: Option<bool>,
}

impl<'a> TodoChangeset<'a> {
    pub(crate) fn from_patch(patch: &'a TodoPatch) -> Self {
        Self {
            title: patch.title.as_deref(),
            description: as_column(&patch.description),
            date: as_column(&patch.date),
            start_time: as_column(&patch.start_time),
            end_time: as_column(&patch.end_time),
            tags: as_column(&patch.tags),
            done: patch.done,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.tags.is_none()
            && self.done.is_none()
    }
}

// ---------------------------------------------------------------------------
// calendar events
// ---------------------------------------------------------------------------

/// Row struct for reading from the calendar events table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = calendar_events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EventRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub date: String,
    pub time: Option<String>,
    pub description: Option<String>,
    pub color: String,
}

impl EventRow {
    pub(crate) fn into_domain(self) -> CalendarEvent {
        CalendarEvent {
            id: self.id,
            owner_id: UserId::from_uuid(self.user_id),
            title: self.title,
            date: self.date,
            time: self.time,
            description: self.description,
            color: self.color,
        }
    }
}

/// Insertable struct for creating new calendar event records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = calendar_events)]
pub(crate) struct NewEventRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: &'a str,
    pub date: &'a str,
    pub time: Option<&'a str>,
    pub description: Option<&'a str>,
    pub color: &'a str,
}

// ---------------------------------------------------------------------------
// notifications
// ---------------------------------------------------------------------------

/// Row struct for reading from the notifications table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NotificationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub kind: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl NotificationRow {
    pub(crate) fn into_domain(self) -> Result<Notification, CorruptRow> {
        let kind = NotificationKind::parse(&self.kind).ok_or_else(|| CorruptRow {
            table: "notifications",
            column: "kind",
            id: self.id,
            value: self.kind.clone(),
        })?;
        Ok(Notification {
            id: self.id,
            recipient_id: UserId::from_uuid(self.user_id),
            message: self.message,
            kind,
            is_read: self.is_read,
            created_at: self.created_at,
        })
    }
}

/// Insertable struct for appending notification records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notifications)]
pub(crate) struct NewNotificationRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message: &'a str,
    pub kind: &'a str,
}

// ---------------------------------------------------------------------------
// access tokens
// ---------------------------------------------------------------------------

/// Row struct for reading from the access tokens table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = access_tokens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccessTokenRow {
    #[expect(dead_code, reason = "key column; lookups filter on it directly")]
    pub fingerprint: String,
    pub user_id: Uuid,
    #[expect(dead_code, reason = "schema field read for completeness; audit only")]
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Insertable struct for recording issued token fingerprints.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = access_tokens)]
pub(crate) struct NewAccessTokenRow<'a> {
    pub fingerprint: &'a str,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}
