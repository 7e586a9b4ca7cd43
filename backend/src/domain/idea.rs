//! Idea entity, status lifecycle, and draft validation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::{PublicProfile, UserId};
use crate::domain::{Error, ErrorCode};

/// Minimum accepted title length in characters.
pub const TITLE_MIN: usize = 3;
/// Maximum accepted title length in characters.
pub const TITLE_MAX: usize = 100;
/// Minimum accepted description length in characters.
pub const DESCRIPTION_MIN: usize = 10;
/// Maximum accepted description length in characters.
pub const DESCRIPTION_MAX: usize = 2000;

/// Validation errors raised while constructing an [`IdeaDraft`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdeaValidationError {
    /// Title length fell outside `[TITLE_MIN, TITLE_MAX]`.
    TitleLength,
    /// Description length fell outside `[DESCRIPTION_MIN, DESCRIPTION_MAX]`.
    DescriptionLength,
    /// Category was empty once trimmed.
    EmptyCategory,
    /// Evaluation status was neither `accepted` nor `rejected`.
    InvalidEvaluationStatus,
}

impl fmt::Display for IdeaValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TitleLength => write!(
                f,
                "title must be between {TITLE_MIN} and {TITLE_MAX} characters"
            ),
            Self::DescriptionLength => write!(
                f,
                "description must be between {DESCRIPTION_MIN} and {DESCRIPTION_MAX} characters"
            ),
            Self::EmptyCategory => write!(f, "category must not be empty"),
            Self::InvalidEvaluationStatus => {
                write!(f, "evaluation status must be 'accepted' or 'rejected'")
            }
        }
    }
}

impl std::error::Error for IdeaValidationError {}

impl From<IdeaValidationError> for Error {
    fn from(value: IdeaValidationError) -> Self {
        Self::new(ErrorCode::Validation, value.to_string())
    }
}

/// Idea review status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum IdeaStatus {
    /// Awaiting review; the state every idea starts in.
    Submitted,
    /// Accepted by an admin.
    Accepted,
    /// Rejected by an admin.
    Rejected,
}

impl IdeaStatus {
    /// Stable string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    /// Parse the stored string form.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "submitted" => Some(Self::Submitted),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for IdeaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of an admin evaluation; the only statuses an evaluation may set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationStatus {
    /// Mark the idea accepted.
    Accepted,
    /// Mark the idea rejected.
    Rejected,
}

impl EvaluationStatus {
    /// Parse a client-supplied status string.
    pub fn parse(value: &str) -> Result<Self, IdeaValidationError> {
        match value {
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            _ => Err(IdeaValidationError::InvalidEvaluationStatus),
        }
    }

    /// The idea status this evaluation resolves to.
    #[must_use]
    pub const fn as_idea_status(self) -> IdeaStatus {
        match self {
            Self::Accepted => IdeaStatus::Accepted,
            Self::Rejected => IdeaStatus::Rejected,
        }
    }
}

/// Validated idea submission, ready for persistence.
///
/// ## Invariants
/// - title length in `[TITLE_MIN, TITLE_MAX]` characters
/// - description length in `[DESCRIPTION_MIN, DESCRIPTION_MAX]` characters
/// - category non-empty once trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaDraft {
    title: String,
    description: String,
    category: String,
    /// Opaque tag text, passed through verbatim.
    pub tags: Option<String>,
    /// Optional problem statement.
    pub problem_statement: Option<String>,
    /// Optional proposed solution.
    pub solution: Option<String>,
}

impl IdeaDraft {
    /// Validate raw submission fields.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, IdeaValidationError> {
        let title = title.into();
        let description = description.into();
        let category = category.into();

        let title_len = title.chars().count();
        if title_len < TITLE_MIN || title_len > TITLE_MAX {
            return Err(IdeaValidationError::TitleLength);
        }
        let description_len = description.chars().count();
        if description_len < DESCRIPTION_MIN || description_len > DESCRIPTION_MAX {
            return Err(IdeaValidationError::DescriptionLength);
        }
        if category.trim().is_empty() {
            return Err(IdeaValidationError::EmptyCategory);
        }

        Ok(Self {
            title,
            description,
            category,
            tags: None,
            problem_statement: None,
            solution: None,
        })
    }

    /// Attach the optional rich-content fields.
    #[must_use]
    pub fn with_rich_content(
        mut self,
        tags: Option<String>,
        problem_statement: Option<String>,
        solution: Option<String>,
    ) -> Self {
        self.tags = tags;
        self.problem_statement = problem_statement;
        self.solution = solution;
        self
    }

    /// Validated title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Validated description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Validated category.
    #[must_use]
    pub fn category(&self) -> &str {
        self.category.as_str()
    }
}

/// Persisted idea record.
#[derive(Debug, Clone, PartialEq)]
pub struct Idea {
    /// Stable identifier.
    pub id: Uuid,
    /// Submitting user.
    pub owner_id: UserId,
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
    /// Admin who evaluated the idea; set exactly once.
    pub reviewer_id: Option<UserId>,
    /// Opaque tag text.
    pub tags: Option<String>,
    /// Optional problem statement.
    pub problem_statement: Option<String>,
    /// Optional proposed solution.
    pub solution: Option<String>,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
}

/// An idea with owner and reviewer identities resolved.
///
/// This is a read-side projection assembled after fetch; the storage model
/// keeps only the foreign keys.
#[derive(Debug, Clone, PartialEq)]
pub struct IdeaWithPeople {
    /// The idea record itself.
    pub idea: Idea,
    /// Public profile of the submitting user, when still resolvable.
    pub owner: Option<PublicProfile>,
    /// Public profile of the evaluating admin, if evaluated.
    pub reviewer: Option<PublicProfile>,
}

#[cfg(test)]
mod tests {
    //! Draft validation bounds and status parsing.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("abc", true)]
    #[case("ab", false)]
    #[case("a", false)]
    fn title_minimum_is_three_characters(#[case] title: &str, #[case] ok: bool) {
        let result = IdeaDraft::new(title, "a description long enough", "AI");
        assert_eq!(result.is_ok(), ok);
    }

    #[test]
    fn title_maximum_is_one_hundred_characters() {
        let exactly = "t".repeat(100);
        assert!(IdeaDraft::new(exactly, "a description long enough", "AI").is_ok());
        let too_long = "t".repeat(101);
        assert_eq!(
            IdeaDraft::new(too_long, "a description long enough", "AI"),
            Err(IdeaValidationError::TitleLength)
        );
    }

    #[rstest]
    #[case(9, false)]
    #[case(10, true)]
    #[case(2000, true)]
    #[case(2001, false)]
    fn description_bounds(#[case] len: usize, #[case] ok: bool) {
        let description = "d".repeat(len);
        assert_eq!(
            IdeaDraft::new("A valid title", description, "AI").is_ok(),
            ok,
            "description length {len}"
        );
    }

    #[test]
    fn blank_category_is_rejected() {
        assert_eq!(
            IdeaDraft::new("A valid title", "a description long enough", "  "),
            Err(IdeaValidationError::EmptyCategory)
        );
    }

    #[test]
    fn length_bounds_count_characters_not_bytes() {
        // Two-byte characters; three of them satisfy the three-character minimum.
        assert!(IdeaDraft::new("äöü", "ä".repeat(10), "AI").is_ok());
    }

    #[rstest]
    #[case("accepted", Ok(EvaluationStatus::Accepted))]
    #[case("rejected", Ok(EvaluationStatus::Rejected))]
    #[case("submitted", Err(IdeaValidationError::InvalidEvaluationStatus))]
    #[case("APPROVED", Err(IdeaValidationError::InvalidEvaluationStatus))]
    fn evaluation_status_parsing(
        #[case] raw: &str,
        #[case] expected: Result<EvaluationStatus, IdeaValidationError>,
    ) {
        assert_eq!(EvaluationStatus::parse(raw), expected);
    }

    #[test]
    fn idea_status_round_trips() {
        for status in [
            IdeaStatus::Submitted,
            IdeaStatus::Accepted,
            IdeaStatus::Rejected,
        ] {
            assert_eq!(IdeaStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(IdeaStatus::parse("shelved"), None);
    }
}
