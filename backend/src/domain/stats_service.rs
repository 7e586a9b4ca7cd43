//! Statistics aggregation use-cases.
//!
//! Recomputed from repository snapshots on every request; nothing is cached.

use std::sync::Arc;

use crate::domain::ports::{IdeaPersistenceError, IdeaRepository};
use crate::domain::stats::{self, AdminStats, UserStats};
use crate::domain::user::UserId;
use crate::domain::Error;

/// Statistics aggregator over the idea repository.
#[derive(Clone)]
pub struct StatsService {
    ideas: Arc<dyn IdeaRepository>,
}

fn map_idea_error(error: IdeaPersistenceError) -> Error {
    match error {
        IdeaPersistenceError::Connection { message } => Error::service_unavailable(message),
        IdeaPersistenceError::Query { message } => Error::internal(message),
    }
}

impl StatsService {
    /// Create the service over its port.
    pub fn new(ideas: Arc<dyn IdeaRepository>) -> Self {
        Self { ideas }
    }

    /// The caller's own submission counters.
    pub async fn for_user(&self, user: &UserId) -> Result<UserStats, Error> {
        let statuses = self
            .ideas
            .statuses_for_owner(user)
            .await
            .map_err(map_idea_error)?;
        Ok(stats::summarize(&statuses))
    }

    /// System-wide counters and the sparse daily submission series.
    pub async fn system(&self) -> Result<AdminStats, Error> {
        let snapshot = self.ideas.status_snapshot().await.map_err(map_idea_error)?;
        Ok(stats::admin_stats(&snapshot))
    }
}

#[cfg(test)]
mod tests {
    use pagination::Page;
    use uuid::Uuid;

    use super::*;
    use crate::domain::idea::{EvaluationStatus, IdeaDraft};
    use crate::domain::ports::NewIdea;
    use crate::test_support::InMemoryIdeas;

    #[tokio::test]
    async fn fresh_users_have_all_zero_stats() {
        let service = StatsService::new(Arc::new(InMemoryIdeas::default()));
        let stats = service
            .for_user(&UserId::random())
            .await
            .expect("stats compute");
        assert_eq!(stats.total, 0);
        assert_eq!(stats.accepted, 0);
        assert_eq!(stats.rejected, 0);
        assert_eq!(stats.success_rate, 0.0);
    }

    #[tokio::test]
    async fn per_user_and_system_stats_agree_with_the_store() {
        let ideas = Arc::new(InMemoryIdeas::default());
        let owner = UserId::random();
        let reviewer = UserId::random();
        for _ in 0..3 {
            ideas
                .insert(NewIdea {
                    id: Uuid::new_v4(),
                    owner_id: owner,
                    draft: IdeaDraft::new("A valid title", "a description long enough", "AI")
                        .expect("valid draft"),
                    file_path: None,
                })
                .await
                .expect("insert succeeds");
        }
        let listed = ideas
            .list_for_owner(&owner, Page::default())
            .await
            .expect("listing succeeds");
        ideas
            .evaluate(
                listed[0].id,
                EvaluationStatus::Accepted.as_idea_status(),
                None,
                &reviewer,
            )
            .await
            .expect("evaluation succeeds");

        let service = StatsService::new(ideas);
        let user_stats = service.for_user(&owner).await.expect("stats compute");
        assert_eq!(user_stats.total, 3);
        assert_eq!(user_stats.accepted, 1);
        assert_eq!(user_stats.pending, 2);
        assert_eq!(user_stats.success_rate, 33.3);

        let system = service.system().await.expect("stats compute");
        assert_eq!(system.total, 3);
        assert_eq!(system.acceptance_rate, 33.3);
        // All three ideas were created just now, so one daily bucket.
        assert_eq!(system.daily_submissions.len(), 1);
        assert_eq!(system.daily_submissions[0].count, 3);
    }
}
