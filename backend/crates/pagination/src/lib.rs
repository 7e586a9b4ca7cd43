//! Offset/limit pagination primitives shared by portal list endpoints.
//!
//! List endpoints accept `skip` and `limit` query parameters. This crate
//! centralises their validation and clamping so every endpoint applies the
//! same rules: offsets must be non-negative, limits are clamped into
//! `[1, MAX_LIMIT]`, and both default sensibly when omitted.

use serde::Deserialize;

/// Default number of rows returned when `limit` is omitted.
pub const DEFAULT_LIMIT: i64 = 100;

/// Upper bound applied to any requested `limit`.
pub const MAX_LIMIT: i64 = 100;

/// Validation failures raised while constructing a [`Page`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    /// The requested offset was negative.
    #[error("skip must not be negative (got {offset})")]
    NegativeOffset {
        /// Offending offset value.
        offset: i64,
    },
    /// The requested limit was negative.
    #[error("limit must not be negative (got {limit})")]
    NegativeLimit {
        /// Offending limit value.
        limit: i64,
    },
}

/// Raw `skip`/`limit` query parameters as deserialised from a request.
///
/// Both fields are optional; convert into a [`Page`] to apply defaults and
/// clamping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PageQuery {
    /// Number of rows to skip from the start of the result set.
    pub skip: Option<i64>,
    /// Maximum number of rows to return.
    pub limit: Option<i64>,
}

/// Validated offset/limit pair ready to hand to a repository.
///
/// ## Invariants
/// - `offset >= 0`
/// - `1 <= limit <= MAX_LIMIT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    offset: i64,
    limit: i64,
}

impl Page {
    /// Build a page from raw values, rejecting negatives and clamping the
    /// limit into `[1, MAX_LIMIT]`.
    ///
    /// # Errors
    /// Returns [`PageError`] when either value is negative. A zero limit is
    /// clamped up to one rather than rejected so that `limit=0` behaves like
    /// the smallest page instead of an error.
    pub const fn new(offset: i64, limit: i64) -> Result<Self, PageError> {
        if offset < 0 {
            return Err(PageError::NegativeOffset { offset });
        }
        if limit < 0 {
            return Err(PageError::NegativeLimit { limit });
        }
        let clamped = if limit < 1 {
            1
        } else if limit > MAX_LIMIT {
            MAX_LIMIT
        } else {
            limit
        };
        Ok(Self {
            offset,
            limit: clamped,
        })
    }

    /// Rows to skip.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        self.offset
    }

    /// Maximum rows to return.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.limit
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl TryFrom<PageQuery> for Page {
    type Error = PageError;

    fn try_from(query: PageQuery) -> Result<Self, Self::Error> {
        Self::new(
            query.skip.unwrap_or(0),
            query.limit.unwrap_or(DEFAULT_LIMIT),
        )
    }
}
