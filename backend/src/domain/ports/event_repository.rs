//! Port abstraction for calendar event persistence adapters.
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::event::{CalendarEvent, EventDraft};
use crate::domain::user::UserId;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by calendar event repository adapters.
    pub enum EventPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "event repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "event repository query failed: {message}",
    }
}

/// Fields required to create a calendar event row.
#[derive(Debug, Clone)]
pub struct NewEvent {
    /// Identifier generated by the caller.
    pub id: Uuid,
    /// Owning user.
    pub owner_id: UserId,
    /// Validated event fields.
    pub draft: EventDraft,
}

/// Driven port for calendar event persistence. Create/list only.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Insert a new event.
    async fn insert(&self, event: NewEvent) -> Result<CalendarEvent, EventPersistenceError>;

    /// One owner's events, date ascending.
    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<CalendarEvent>, EventPersistenceError>;
}
