//! Calendar event entity.

use std::fmt;

use uuid::Uuid;

use crate::domain::user::UserId;
use crate::domain::{Error, ErrorCode};

/// Default marker colour applied when the client does not pick one.
pub const DEFAULT_COLOR: &str = "#06b6d4";

/// Validation errors raised by event constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    /// Title was empty once trimmed.
    EmptyTitle,
    /// Date was not `YYYY-MM-DD`.
    InvalidDate,
}

impl fmt::Display for EventValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::InvalidDate => write!(f, "date must be formatted as YYYY-MM-DD"),
        }
    }
}

impl std::error::Error for EventValidationError {}

impl From<EventValidationError> for Error {
    fn from(value: EventValidationError) -> Self {
        Self::new(ErrorCode::Validation, value.to_string())
    }
}

/// Persisted calendar event. Create/list only; no update or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    /// Stable identifier.
    pub id: Uuid,
    /// Owning user.
    pub owner_id: UserId,
    /// Short title.
    pub title: String,
    /// Date label, `YYYY-MM-DD`.
    pub date: String,
    /// Optional time label, `HH:MM`.
    pub time: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// Display colour.
    pub color: String,
}

/// Validated fields for a new calendar event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    title: String,
    date: String,
    /// Optional time label.
    pub time: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// Display colour; defaults to [`DEFAULT_COLOR`].
    pub color: String,
}

impl EventDraft {
    /// Validate the required title and date.
    pub fn new(
        title: impl Into<String>,
        date: impl Into<String>,
    ) -> Result<Self, EventValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(EventValidationError::EmptyTitle);
        }
        let date = date.into();
        if chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_err() {
            return Err(EventValidationError::InvalidDate);
        }
        Ok(Self {
            title,
            date,
            time: None,
            description: None,
            color: DEFAULT_COLOR.to_owned(),
        })
    }

    /// Validated title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Validated date label.
    #[must_use]
    pub fn date(&self) -> &str {
        self.date.as_str()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Demo day", "2026-08-06", true)]
    #[case("", "2026-08-06", false)]
    #[case("Demo day", "06/08/2026", false)]
    #[case("Demo day", "2026-13-40", false)]
    fn draft_validation(#[case] title: &str, #[case] date: &str, #[case] ok: bool) {
        assert_eq!(EventDraft::new(title, date).is_ok(), ok);
    }

    #[test]
    fn colour_defaults_to_the_portal_accent() {
        let draft = EventDraft::new("Demo", "2026-08-06").expect("valid draft");
        assert_eq!(draft.color, DEFAULT_COLOR);
    }
}
