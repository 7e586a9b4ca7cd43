//! Harness bundling the in-memory adapters behind an [`HttpState`].

use std::sync::Arc;

use crate::inbound::http::state::{HttpState, HttpStatePorts};

use super::memory::{
    InMemoryAttachments, InMemoryEvents, InMemoryIdeas, InMemoryNotifications, InMemoryTodos,
    InMemoryTokens, InMemoryUsers, PlainCredentialHasher,
};

/// In-memory adapter set with handles retained for direct inspection.
///
/// Integration suites drive the HTTP surface for everything a client can do
/// and reach through these handles only for what the original test fixtures
/// did out of band (promoting an admin, seeding rows).
pub struct TestHarness {
    /// User rows.
    pub users: Arc<InMemoryUsers>,
    /// Idea rows.
    pub ideas: Arc<InMemoryIdeas>,
    /// Todo rows.
    pub todos: Arc<InMemoryTodos>,
    /// Calendar event rows.
    pub events: Arc<InMemoryEvents>,
    /// Notification rows.
    pub notifications: Arc<InMemoryNotifications>,
    /// Issued tokens.
    pub tokens: Arc<InMemoryTokens>,
    /// Saved attachment names.
    pub attachments: Arc<InMemoryAttachments>,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    /// Fresh, empty adapters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: Arc::new(InMemoryUsers::default()),
            ideas: Arc::new(InMemoryIdeas::default()),
            todos: Arc::new(InMemoryTodos::default()),
            events: Arc::new(InMemoryEvents::default()),
            notifications: Arc::new(InMemoryNotifications::default()),
            tokens: Arc::new(InMemoryTokens::default()),
            attachments: Arc::new(InMemoryAttachments::default()),
        }
    }

    /// Wire the adapters into handler state.
    #[must_use]
    pub fn http_state(&self) -> HttpState {
        HttpState::new(HttpStatePorts {
            users: self.users.clone(),
            ideas: self.ideas.clone(),
            todos: self.todos.clone(),
            events: self.events.clone(),
            notifications: self.notifications.clone(),
            hasher: Arc::new(PlainCredentialHasher),
            tokens: self.tokens.clone(),
            attachments: self.attachments.clone(),
        })
    }
}
