//! Calendar event use-cases: create and list, nothing else.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::event::{CalendarEvent, EventDraft};
use crate::domain::ports::{EventPersistenceError, EventRepository, NewEvent};
use crate::domain::user::{User, UserId};
use crate::domain::Error;

/// Calendar event service.
#[derive(Clone)]
pub struct EventService {
    events: Arc<dyn EventRepository>,
}

fn map_event_error(error: EventPersistenceError) -> Error {
    match error {
        EventPersistenceError::Connection { message } => Error::service_unavailable(message),
        EventPersistenceError::Query { message } => Error::internal(message),
    }
}

impl EventService {
    /// Create the service over its port.
    pub fn new(events: Arc<dyn EventRepository>) -> Self {
        Self { events }
    }

    /// Create an event owned by the caller.
    pub async fn create(&self, caller: &User, draft: EventDraft) -> Result<CalendarEvent, Error> {
        self.events
            .insert(NewEvent {
                id: Uuid::new_v4(),
                owner_id: caller.id,
                draft,
            })
            .await
            .map_err(map_event_error)
    }

    /// The caller's events, date ascending.
    pub async fn list(&self, caller: &UserId) -> Result<Vec<CalendarEvent>, Error> {
        self.events
            .list_for_owner(caller)
            .await
            .map_err(map_event_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{Email, Role};
    use crate::test_support::InMemoryEvents;

    fn user() -> User {
        User {
            id: UserId::random(),
            email: Email::new("a@x.com").expect("valid email"),
            password_hash: "plain$password".to_owned(),
            role: Role::Submitter,
            is_active: true,
            avatar_url: None,
            bio: None,
            github_link: None,
            linkedin_link: None,
            studio_name: None,
        }
    }

    #[tokio::test]
    async fn events_list_in_date_order_per_owner() {
        let service = EventService::new(Arc::new(InMemoryEvents::default()));
        let owner = user();
        let other = user();

        for (title, date) in [("Later", "2026-09-01"), ("Sooner", "2026-08-01")] {
            service
                .create(&owner, EventDraft::new(title, date).expect("valid draft"))
                .await
                .expect("creation succeeds");
        }
        service
            .create(
                &other,
                EventDraft::new("Unrelated", "2026-01-01").expect("valid draft"),
            )
            .await
            .expect("creation succeeds");

        let events = service.list(&owner.id).await.expect("listing succeeds");
        assert_eq!(
            events.iter().map(|e| e.title.as_str()).collect::<Vec<_>>(),
            vec!["Sooner", "Later"]
        );
    }
}
