//! User identity, roles, and profile data.
//!
//! The [`User`] entity carries the stored credential hash and is therefore
//! never serialised directly; inbound adapters project it into wire DTOs.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::domain::{Error, ErrorCode};

/// Validation errors raised by user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Identifier was empty or not a UUID.
    InvalidId,
    /// Email was empty once trimmed.
    EmptyEmail,
    /// Email did not have a `local@domain` shape.
    InvalidEmail,
    /// Role string was neither `submitter` nor `admin`.
    UnknownRole,
    /// A profile link was not a parseable URL.
    InvalidLink {
        /// Name of the offending field.
        field: &'static str,
    },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must look like local@domain"),
            Self::UnknownRole => write!(f, "role must be either 'submitter' or 'admin'"),
            Self::InvalidLink { field } => write!(f, "{field} must be a valid URL"),
        }
    }
}

impl std::error::Error for UserValidationError {}

impl From<UserValidationError> for Error {
    fn from(value: UserValidationError) -> Self {
        Self::new(ErrorCode::Validation, value.to_string())
    }
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Wrap an already-parsed UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated email address.
///
/// ## Invariants
/// - trimmed, non-empty
/// - exactly one `@` separating a non-empty local part from a domain that
///   contains at least one dot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        let mut parts = trimmed.splitn(2, '@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.contains('@') {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Portal role; submitters manage only their own records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Default role granted at registration.
    Submitter,
    /// Elevated role: evaluates ideas, manages users, assigns todos.
    Admin,
}

impl Role {
    /// Stable string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submitter => "submitter",
            Self::Admin => "admin",
        }
    }

    /// Parse the stored string form.
    pub fn parse(value: &str) -> Result<Self, UserValidationError> {
        match value {
            "submitter" => Ok(Self::Submitter),
            "admin" => Ok(Self::Admin),
            _ => Err(UserValidationError::UnknownRole),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application user.
///
/// Holds the stored credential hash; never serialise this type to a client.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Stable identifier.
    pub id: UserId,
    /// Unique login email.
    pub email: Email,
    /// Opaque credential produced by the password hasher.
    pub password_hash: String,
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

impl User {
    /// Reduced projection safe to show without authentication.
    #[must_use]
    pub fn public_profile(&self) -> PublicProfile {
        PublicProfile {
            id: self.id,
            email: self.email.clone(),
            avatar_url: self.avatar_url.clone(),
            bio: self.bio.clone(),
            github_link: self.github_link.clone(),
            linkedin_link: self.linkedin_link.clone(),
            studio_name: self.studio_name.clone(),
        }
    }
}

/// Public projection of a user: no credential, no role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PublicProfile {
    /// Stable identifier.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: UserId,
    /// Login email.
    #[schema(value_type = String, example = "ada@example.com")]
    pub email: Email,
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

/// Field-presence profile patch.
///
/// Each field distinguishes three states: `None` leaves the stored value
/// unchanged, `Some(None)` clears it, and `Some(Some(value))` overwrites it —
/// including with an explicit empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// Avatar image URL.
    pub avatar_url: Option<Option<String>>,
    /// Free-text biography.
    pub bio: Option<Option<String>>,
    /// GitHub profile link.
    pub github_link: Option<Option<String>>,
    /// LinkedIn profile link.
    pub linkedin_link: Option<Option<String>>,
    /// Studio or team name.
    pub studio_name: Option<Option<String>>,
}

impl ProfileUpdate {
    /// True when no field was supplied; applying such a patch is a no-op.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.avatar_url.is_none()
            && self.bio.is_none()
            && self.github_link.is_none()
            && self.linkedin_link.is_none()
            && self.studio_name.is_none()
    }

    /// Reject link fields that are present, non-empty, and not valid URLs.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        for (field, value) in [
            ("avatar_url", &self.avatar_url),
            ("github_link", &self.github_link),
            ("linkedin_link", &self.linkedin_link),
        ] {
            if let Some(Some(raw)) = value {
                if !raw.is_empty() && Url::parse(raw).is_err() {
                    return Err(UserValidationError::InvalidLink { field });
                }
            }
        }
        Ok(())
    }

    /// Apply the patch to a user, returning the updated copy.
    #[must_use]
    pub fn apply(&self, mut user: User) -> User {
        if let Some(value) = &self.avatar_url {
            user.avatar_url = value.clone();
        }
        if let Some(value) = &self.bio {
            user.bio = value.clone();
        }
        if let Some(value) = &self.github_link {
            user.github_link = value.clone();
        }
        if let Some(value) = &self.linkedin_link {
            user.linkedin_link = value.clone();
        }
        if let Some(value) = &self.studio_name {
            user.studio_name = value.clone();
        }
        user
    }
}

#[cfg(test)]
mod tests;
