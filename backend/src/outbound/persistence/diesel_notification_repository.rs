//! PostgreSQL-backed `NotificationRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::notification::Notification;
use crate::domain::ports::{
    NewNotification, NotificationPersistenceError, NotificationRepository,
};
use crate::domain::user::UserId;

use super::models::{NewNotificationRow, NotificationRow};
use super::pool::{DbPool, PoolError};
use super::schema::notifications;

/// Diesel-backed implementation of the `NotificationRepository` port.
#[derive(Clone)]
pub struct DieselNotificationRepository {
    pool: DbPool,
}

impl DieselNotificationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> NotificationPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            NotificationPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> NotificationPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            NotificationPersistenceError::connection("database connection error")
        }
        other => {
            debug!(error = %other, "notification query failed");
            NotificationPersistenceError::query("database error")
        }
    }
}

#[async_trait]
impl NotificationRepository for DieselNotificationRepository {
    async fn insert(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, NotificationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: NotificationRow = diesel::insert_into(notifications::table)
            .values(&NewNotificationRow {
                id: notification.id,
                user_id: *notification.recipient_id.as_uuid(),
                message: &notification.message,
                kind: notification.kind.as_str(),
            })
            .returning(NotificationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row.into_domain()
            .map_err(|err| NotificationPersistenceError::query(err.to_string()))
    }

    async fn list_recent(
        &self,
        recipient: &UserId,
        limit: i64,
    ) -> Result<Vec<Notification>, NotificationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<NotificationRow> = notifications::table
            .filter(notifications::user_id.eq(recipient.as_uuid()))
            .order(notifications::created_at.desc())
            .limit(limit)
            .select(NotificationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|row| {
                row.into_domain()
                    .map_err(|err| NotificationPersistenceError::query(err.to_string()))
            })
            .collect()
    }

    async fn mark_all_read(
        &self,
        recipient: &UserId,
    ) -> Result<u64, NotificationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changed = diesel::update(
            notifications::table
                .filter(notifications::user_id.eq(recipient.as_uuid()))
                .filter(notifications::is_read.eq(false)),
        )
        .set(notifications::is_read.eq(true))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(changed as u64)
    }
}
