//! PostgreSQL-backed `IdeaRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use pagination::Page;
use tracing::debug;
use uuid::Uuid;

use crate::domain::idea::{Idea, IdeaStatus};
use crate::domain::ports::{IdeaPersistenceError, IdeaRepository, NewIdea};
use crate::domain::user::UserId;

use super::models::{CorruptRow, IdeaRow, NewIdeaRow};
use super::pool::{DbPool, PoolError};
use super::schema::ideas;

/// Diesel-backed implementation of the `IdeaRepository` port.
#[derive(Clone)]
pub struct DieselIdeaRepository {
    pool: DbPool,
}

impl DieselIdeaRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> IdeaPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            IdeaPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> IdeaPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            IdeaPersistenceError::connection("database connection error")
        }
        other => {
            debug!(error = %other, "idea query failed");
            IdeaPersistenceError::query("database error")
        }
    }
}

fn map_corrupt_row(error: CorruptRow) -> IdeaPersistenceError {
    IdeaPersistenceError::query(error.to_string())
}

fn parse_status(id: Uuid, raw: &str) -> Result<IdeaStatus, IdeaPersistenceError> {
    IdeaStatus::parse(raw).ok_or_else(|| {
        map_corrupt_row(CorruptRow {
            table: "ideas",
            column: "status",
            id,
            value: raw.to_owned(),
        })
    })
}

#[async_trait]
impl IdeaRepository for DieselIdeaRepository {
    async fn insert(&self, idea: NewIdea) -> Result<Idea, IdeaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: IdeaRow = diesel::insert_into(ideas::table)
            .values(&NewIdeaRow {
                id: idea.id,
                user_id: *idea.owner_id.as_uuid(),
                title: idea.draft.title(),
                description: idea.draft.description(),
                category: idea.draft.category(),
                file_path: idea.file_path.as_deref(),
                status: IdeaStatus::Submitted.as_str(),
                tags: idea.draft.tags.as_deref(),
                problem_statement: idea.draft.problem_statement.as_deref(),
                solution: idea.draft.solution.as_deref(),
            })
            .returning(IdeaRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row.into_domain().map_err(map_corrupt_row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Idea>, IdeaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = ideas::table
            .find(id)
            .select(IdeaRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(IdeaRow::into_domain)
            .transpose()
            .map_err(map_corrupt_row)
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
        page: Page,
    ) -> Result<Vec<Idea>, IdeaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<IdeaRow> = ideas::table
            .filter(ideas::user_id.eq(owner.as_uuid()))
            .order(ideas::created_at.asc())
            .offset(page.offset())
            .limit(page.limit())
            .select(IdeaRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|row| row.into_domain().map_err(map_corrupt_row))
            .collect()
    }

    async fn list_all(&self, page: Page) -> Result<Vec<Idea>, IdeaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<IdeaRow> = ideas::table
            .order(ideas::created_at.asc())
            .offset(page.offset())
            .limit(page.limit())
            .select(IdeaRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|row| row.into_domain().map_err(map_corrupt_row))
            .collect()
    }

    async fn evaluate(
        &self,
        id: Uuid,
        status: IdeaStatus,
        comment: Option<String>,
        reviewer: &UserId,
    ) -> Result<Option<Idea>, IdeaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let reviewer_id = *reviewer.as_uuid();
        // Read-then-write as one unit of work so concurrent evaluations
        // cannot interleave partially.
        let row: Option<IdeaRow> = conn
            .transaction(|conn| {
                async move {
                    let existing: Option<IdeaRow> = ideas::table
                        .find(id)
                        .select(IdeaRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    if existing.is_none() {
                        return Ok(None);
                    }
                    diesel::update(ideas::table.find(id))
                        .set((
                            ideas::status.eq(status.as_str()),
                            ideas::admin_comment.eq(comment.as_deref()),
                            ideas::reviewed_by_id.eq(Some(reviewer_id)),
                        ))
                        .returning(IdeaRow::as_returning())
                        .get_result(conn)
                        .await
                        .optional()
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        row.map(IdeaRow::into_domain)
            .transpose()
            .map_err(map_corrupt_row)
    }

    async fn statuses_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<IdeaStatus>, IdeaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(Uuid, String)> = ideas::table
            .filter(ideas::user_id.eq(owner.as_uuid()))
            .select((ideas::id, ideas::status))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|(id, raw)| parse_status(id, &raw))
            .collect()
    }

    async fn status_snapshot(
        &self,
    ) -> Result<Vec<(IdeaStatus, DateTime<Utc>)>, IdeaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(Uuid, String, DateTime<Utc>)> = ideas::table
            .select((ideas::id, ideas::status, ideas::created_at))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|(id, raw, created_at)| parse_status(id, &raw).map(|status| (status, created_at)))
            .collect()
    }
}
