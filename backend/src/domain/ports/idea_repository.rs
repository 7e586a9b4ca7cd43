//! Port abstraction for idea persistence adapters.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::Page;
use uuid::Uuid;

use crate::domain::idea::{Idea, IdeaDraft, IdeaStatus};
use crate::domain::user::UserId;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by idea repository adapters.
    pub enum IdeaPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "idea repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "idea repository query failed: {message}",
    }
}

/// Fields required to create an idea row.
#[derive(Debug, Clone)]
pub struct NewIdea {
    /// Identifier generated by the caller.
    pub id: Uuid,
    /// Submitting user.
    pub owner_id: UserId,
    /// Validated submission fields.
    pub draft: IdeaDraft,
    /// Stored attachment path, when an upload succeeded.
    pub file_path: Option<String>,
}

/// Driven port for idea persistence.
#[async_trait]
pub trait IdeaRepository: Send + Sync {
    /// Insert a new idea with status `submitted` and no reviewer.
    async fn insert(&self, idea: NewIdea) -> Result<Idea, IdeaPersistenceError>;

    /// Fetch an idea by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Idea>, IdeaPersistenceError>;

    /// Page through one owner's ideas.
    async fn list_for_owner(
        &self,
        owner: &UserId,
        page: Page,
    ) -> Result<Vec<Idea>, IdeaPersistenceError>;

    /// Page through every idea.
    async fn list_all(&self, page: Page) -> Result<Vec<Idea>, IdeaPersistenceError>;

    /// Atomically set status, comment, and reviewer; `None` when the id is
    /// unknown.
    async fn evaluate(
        &self,
        id: Uuid,
        status: IdeaStatus,
        comment: Option<String>,
        reviewer: &UserId,
    ) -> Result<Option<Idea>, IdeaPersistenceError>;

    /// Status of every idea belonging to one owner.
    async fn statuses_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<IdeaStatus>, IdeaPersistenceError>;

    /// Status and creation timestamp of every idea in the store.
    async fn status_snapshot(
        &self,
    ) -> Result<Vec<(IdeaStatus, DateTime<Utc>)>, IdeaPersistenceError>;
}
