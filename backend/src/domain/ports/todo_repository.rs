//! Port abstraction for todo persistence adapters.
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::todo::{Todo, TodoDraft, TodoPatch};
use crate::domain::user::UserId;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by todo repository adapters.
    pub enum TodoPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "todo repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "todo repository query failed: {message}",
    }
}

/// Fields required to create a todo row.
#[derive(Debug, Clone)]
pub struct NewTodo {
    /// Identifier generated by the caller.
    pub id: Uuid,
    /// Owning user.
    pub owner_id: UserId,
    /// Validated todo fields.
    pub draft: TodoDraft,
    /// Assigning admin, when created on the owner's behalf.
    pub assigned_by: Option<UserId>,
}

/// Driven port for todo persistence.
///
/// Update and delete scope by `(id, owner)`; a miss on either axis reads the
/// same as an unknown id so existence never leaks across owners.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Insert a new todo with `done = false`.
    async fn insert(&self, todo: NewTodo) -> Result<Todo, TodoPersistenceError>;

    /// One owner's todos in creation order.
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Todo>, TodoPersistenceError>;

    /// Apply a field-presence patch inside one unit of work; `None` when the
    /// `(id, owner)` pair matches nothing.
    async fn update(
        &self,
        id: Uuid,
        owner: &UserId,
        patch: &TodoPatch,
    ) -> Result<Option<Todo>, TodoPersistenceError>;

    /// Delete by `(id, owner)`; `false` when nothing matched.
    async fn delete(&self, id: Uuid, owner: &UserId) -> Result<bool, TodoPersistenceError>;
}
