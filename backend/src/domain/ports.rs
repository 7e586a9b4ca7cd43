//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod attachment_store;
mod credential_hasher;
mod event_repository;
mod idea_repository;
mod notification_repository;
mod todo_repository;
mod token_issuer;
mod user_repository;

pub use attachment_store::{AttachmentStore, AttachmentStoreError};
pub use credential_hasher::{CredentialHasher, CredentialHashError};
pub use event_repository::{EventPersistenceError, EventRepository, NewEvent};
pub use idea_repository::{IdeaPersistenceError, IdeaRepository, NewIdea};
pub use notification_repository::{
    NewNotification, NotificationPersistenceError, NotificationRepository,
};
pub use todo_repository::{NewTodo, TodoPersistenceError, TodoRepository};
pub use token_issuer::{TokenIssuer, TokenIssuerError};
pub use user_repository::{NewUser, UserPersistenceError, UserRepository};
