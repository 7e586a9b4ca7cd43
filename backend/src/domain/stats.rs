//! Idea submission statistics.
//!
//! Everything here is a pure fold over status/date snapshots fetched through
//! the idea repository; nothing is cached and every request recomputes from
//! the store.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::idea::IdeaStatus;

/// Per-user submission counters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserStats {
    /// Ideas submitted in total.
    pub total: u64,
    /// Ideas accepted.
    pub accepted: u64,
    /// Ideas rejected.
    pub rejected: u64,
    /// Ideas still awaiting review: `total - accepted - rejected`.
    pub pending: u64,
    /// `round(accepted / total * 100, 1)`, or `0.0` when nothing was
    /// submitted.
    pub success_rate: f64,
}

/// One day's submission count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DailyCount {
    /// Calendar date, `YYYY-MM-DD`.
    #[schema(example = "2026-08-06")]
    pub date: String,
    /// Ideas created on that date.
    pub count: u64,
}

/// System-wide counters plus the sparse per-day submission series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AdminStats {
    /// Ideas submitted in total.
    pub total: u64,
    /// Ideas accepted.
    pub accepted: u64,
    /// Ideas rejected.
    pub rejected: u64,
    /// Ideas still awaiting review.
    pub pending: u64,
    /// Same formula as the per-user success rate, over all ideas.
    pub acceptance_rate: f64,
    /// One entry per distinct submission date, ascending; days without
    /// submissions are absent rather than zero.
    pub daily_submissions: Vec<DailyCount>,
}

/// Percentage of accepted ideas, rounded to one decimal place.
///
/// Returns `0.0` when `total` is zero.
#[must_use]
pub fn acceptance_percentage(accepted: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[expect(
        clippy::cast_precision_loss,
        reason = "idea counts stay far below 2^52"
    )]
    #[expect(
        clippy::float_arithmetic,
        reason = "the success rate is a display percentage, not money"
    )]
    let rate = {
        let raw = accepted as f64 / total as f64 * 100.0;
        (raw * 10.0).round() / 10.0
    };
    rate
}

/// Fold idea statuses into the per-user counter shape.
#[must_use]
pub fn summarize<'a, I>(statuses: I) -> UserStats
where
    I: IntoIterator<Item = &'a IdeaStatus>,
{
    let mut total = 0_u64;
    let mut accepted = 0_u64;
    let mut rejected = 0_u64;
    for status in statuses {
        total += 1;
        match status {
            IdeaStatus::Accepted => accepted += 1,
            IdeaStatus::Rejected => rejected += 1,
            IdeaStatus::Submitted => {}
        }
    }
    UserStats {
        total,
        accepted,
        rejected,
        pending: total - accepted - rejected,
        success_rate: acceptance_percentage(accepted, total),
    }
}

/// Group creation timestamps into ascending per-day counts.
///
/// The series is sparse: only dates with at least one submission appear, and
/// no window is applied — all history contributes.
#[must_use]
pub fn daily_submissions<'a, I>(created: I) -> Vec<DailyCount>
where
    I: IntoIterator<Item = &'a DateTime<Utc>>,
{
    let mut buckets: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for timestamp in created {
        *buckets.entry(timestamp.date_naive()).or_insert(0) += 1;
    }
    buckets
        .into_iter()
        .map(|(date, count)| DailyCount {
            date: date.format("%Y-%m-%d").to_string(),
            count,
        })
        .collect()
}

/// Combine status and timestamp snapshots into the admin dashboard shape.
#[must_use]
pub fn admin_stats(snapshot: &[(IdeaStatus, DateTime<Utc>)]) -> AdminStats {
    let counters = summarize(snapshot.iter().map(|(status, _)| status));
    AdminStats {
        total: counters.total,
        accepted: counters.accepted,
        rejected: counters.rejected,
        pending: counters.pending,
        acceptance_rate: counters.success_rate,
        daily_submissions: daily_submissions(snapshot.iter().map(|(_, at)| at)),
    }
}
