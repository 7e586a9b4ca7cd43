//! PostgreSQL-backed `EventRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::event::CalendarEvent;
use crate::domain::ports::{EventPersistenceError, EventRepository, NewEvent};
use crate::domain::user::UserId;

use super::models::{EventRow, NewEventRow};
use super::pool::{DbPool, PoolError};
use super::schema::calendar_events;

/// Diesel-backed implementation of the `EventRepository` port.
#[derive(Clone)]
pub struct DieselEventRepository {
    pool: DbPool,
}

impl DieselEventRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EventPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            EventPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> EventPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            EventPersistenceError::connection("database connection error")
        }
        other => {
            debug!(error = %other, "calendar event query failed");
            EventPersistenceError::query("database error")
        }
    }
}

#[async_trait]
impl EventRepository for DieselEventRepository {
    async fn insert(&self, event: NewEvent) -> Result<CalendarEvent, EventPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: EventRow = diesel::insert_into(calendar_events::table)
            .values(&NewEventRow {
                id: event.id,
                user_id: *event.owner_id.as_uuid(),
                title: event.draft.title(),
                date: event.draft.date(),
                time: event.draft.time.as_deref(),
                description: event.draft.description.as_deref(),
                color: &event.draft.color,
            })
            .returning(EventRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into_domain())
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<CalendarEvent>, EventPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<EventRow> = calendar_events::table
            .filter(calendar_events::user_id.eq(owner.as_uuid()))
            .order(calendar_events::date.asc())
            .select(EventRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(EventRow::into_domain).collect())
    }
}
