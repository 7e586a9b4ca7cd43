//! Todo entity and field-presence patch semantics.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::user::UserId;
use crate::domain::{Error, ErrorCode};

/// Validation errors raised by todo constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    /// Title was empty once trimmed.
    EmptyTitle,
}

impl fmt::Display for TodoValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
        }
    }
}

impl std::error::Error for TodoValidationError {}

impl From<TodoValidationError> for Error {
    fn from(value: TodoValidationError) -> Self {
        Self::new(ErrorCode::Validation, value.to_string())
    }
}

/// Persisted todo item.
#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    /// Stable identifier.
    pub id: Uuid,
    /// Owning user.
    pub owner_id: UserId,
    /// Short title.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Optional date label, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Optional start time, `HH:MM`.
    pub start_time: Option<String>,
    /// Optional end time, `HH:MM`.
    pub end_time: Option<String>,
    /// Opaque tag text.
    pub tags: Option<String>,
    /// Admin who assigned the task, when created on the owner's behalf.
    pub assigned_by: Option<UserId>,
    /// Completion flag.
    pub done: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Validated fields for a new todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    title: String,
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
}

impl TodoDraft {
    /// Validate the required title; optional fields default to `None`.
    pub fn new(title: impl Into<String>) -> Result<Self, TodoValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(TodoValidationError::EmptyTitle);
        }
        Ok(Self {
            title,
            description: None,
            date: None,
            start_time: None,
            end_time: None,
            tags: None,
        })
    }

    /// Validated title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }
}

/// Field-presence todo patch.
///
/// `title` and `done` are non-nullable, so a plain `Option` covers them:
/// absent means unchanged. The nullable fields use a double `Option` so an
/// explicit null clears while an absent key leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    /// Replacement title, when supplied.
    pub title: Option<String>,
    /// Replacement or cleared description.
    pub description: Option<Option<String>>,
    /// Replacement or cleared date.
    pub date: Option<Option<String>>,
    /// Replacement or cleared start time.
    pub start_time: Option<Option<String>>,
    /// Replacement or cleared end time.
    pub end_time: Option<Option<String>>,
    /// Replacement or cleared tag text.
    pub tags: Option<Option<String>>,
    /// Replacement done flag, when supplied.
    pub done: Option<bool>,
}

impl TodoPatch {
    /// Reject a supplied-but-blank title.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(TodoValidationError::EmptyTitle);
            }
        }
        Ok(())
    }

    /// Apply the patch to a todo, returning the updated copy.
    #[must_use]
    pub fn apply(&self, mut todo: Todo) -> Todo {
        if let Some(title) = &self.title {
            todo.title = title.clone();
        }
        if let Some(value) = &self.description {
            todo.description = value.clone();
        }
        if let Some(value) = &self.date {
            todo.date = value.clone();
        }
        if let Some(value) = &self.start_time {
            todo.start_time = value.clone();
        }
        if let Some(value) = &self.end_time {
            todo.end_time = value.clone();
        }
        if let Some(value) = &self.tags {
            todo.tags = value.clone();
        }
        if let Some(done) = self.done {
            todo.done = done;
        }
        todo
    }
}
