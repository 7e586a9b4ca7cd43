//! PostgreSQL-backed `TodoRepository` implementation using Diesel.
//!
//! Every mutation filters on `(id, user_id)` so rows belonging to other
//! owners behave exactly like missing rows.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{NewTodo, TodoPersistenceError, TodoRepository};
use crate::domain::todo::{Todo, TodoPatch};
use crate::domain::user::UserId;

use super::models::{NewTodoRow, TodoChangeset, TodoRow};
use super::pool::{DbPool, PoolError};
use super::schema::todos;

/// Diesel-backed implementation of the `TodoRepository` port.
#[derive(Clone)]
pub struct DieselTodoRepository {
    pool: DbPool,
}

impl DieselTodoRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TodoPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            TodoPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> TodoPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            TodoPersistenceError::connection("database connection error")
        }
        other => {
            debug!(error = %other, "todo query failed");
            TodoPersistenceError::query("database error")
        }
    }
}

#[async_trait]
impl TodoRepository for DieselTodoRepository {
    async fn insert(&self, todo: NewTodo) -> Result<Todo, TodoPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: TodoRow = diesel::insert_into(todos::table)
            .values(&NewTodoRow {
                id: todo.id,
                user_id: *todo.owner_id.as_uuid(),
                title: todo.draft.title(),
                description: todo.draft.description.as_deref(),
                date: todo.draft.date.as_deref(),
                start_time: todo.draft.start_time.as_deref(),
                end_time: todo.draft.end_time.as_deref(),
                tags: todo.draft.tags.as_deref(),
                assigned_by: todo.assigned_by.map(|id| *id.as_uuid()),
            })
            .returning(TodoRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into_domain())
    }

    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Todo>, TodoPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TodoRow> = todos::table
            .filter(todos::user_id.eq(owner.as_uuid()))
            .order(todos::created_at.asc())
            .select(TodoRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(TodoRow::into_domain).collect())
    }

    async fn update(
        &self,
        id: Uuid,
        owner: &UserId,
        patch: &TodoPatch,
    ) -> Result<Option<Todo>, TodoPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let scoped = todos::table
            .filter(todos::id.eq(id))
            .filter(todos::user_id.eq(owner.as_uuid()));

        let changeset = TodoChangeset::from_patch(patch);
        // An all-absent patch has nothing to write; answer with the scoped
        // row so a cross-owner miss still reads as absent.
        let row: Option<TodoRow> = if changeset.is_empty() {
            scoped
                .select(TodoRow::as_select())
                .first(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?
        } else {
            diesel::update(scoped)
                .set(&changeset)
                .returning(TodoRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?
        };
        Ok(row.map(TodoRow::into_domain))
    }

    async fn delete(&self, id: Uuid, owner: &UserId) -> Result<bool, TodoPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            todos::table
                .filter(todos::id.eq(id))
                .filter(todos::user_id.eq(owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
