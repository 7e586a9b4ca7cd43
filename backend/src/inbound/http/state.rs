//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they depend
//! only on domain services and remain testable without I/O: tests wire the
//! same services over in-memory adapters.

use std::sync::Arc;

use crate::domain::ports::{
    AttachmentStore, CredentialHasher, EventRepository, IdeaRepository, NotificationRepository,
    TodoRepository, TokenIssuer, UserRepository,
};
use crate::domain::{
    AccountService, AuthGate, EventService, IdeaService, NotificationService, StatsService,
    TodoService,
};

/// Parameter object bundling every port implementation the services need.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// User persistence.
    pub users: Arc<dyn UserRepository>,
    /// Idea persistence.
    pub ideas: Arc<dyn IdeaRepository>,
    /// Todo persistence.
    pub todos: Arc<dyn TodoRepository>,
    /// Calendar event persistence.
    pub events: Arc<dyn EventRepository>,
    /// Notification persistence.
    pub notifications: Arc<dyn NotificationRepository>,
    /// Password hashing capability.
    pub hasher: Arc<dyn CredentialHasher>,
    /// Bearer-token capability.
    pub tokens: Arc<dyn TokenIssuer>,
    /// Attachment storage.
    pub attachments: Arc<dyn AttachmentStore>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Bearer resolution and role checks.
    pub auth: AuthGate,
    /// Registration, login, profiles, roles.
    pub accounts: AccountService,
    /// Idea registry.
    pub ideas: IdeaService,
    /// Todo registry.
    pub todos: TodoService,
    /// Calendar events.
    pub events: EventService,
    /// Notification feed.
    pub notifications: NotificationService,
    /// Statistics aggregation.
    pub stats: StatsService,
}

impl HttpState {
    /// Wire every service from a ports bundle.
    #[must_use]
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            users,
            ideas,
            todos,
            events,
            notifications,
            hasher,
            tokens,
            attachments,
        } = ports;

        Self {
            auth: AuthGate::new(users.clone(), tokens.clone()),
            accounts: AccountService::new(users.clone(), ideas.clone(), hasher, tokens),
            ideas: IdeaService::new(ideas.clone(), users.clone(), attachments),
            todos: TodoService::new(todos, notifications.clone(), users),
            events: EventService::new(events),
            notifications: NotificationService::new(notifications),
            stats: StatsService::new(ideas),
        }
    }
}
