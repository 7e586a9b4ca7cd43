//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::user::{Email, ProfileUpdate, Role, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Insert collided with the unique email constraint.
        DuplicateEmail => "email already registered",
    }
}

/// Fields required to create a user row.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Identifier generated by the caller.
    pub id: UserId,
    /// Unique login email.
    pub email: Email,
    /// Credential produced by the hasher.
    pub password_hash: String,
    /// Initial role.
    pub role: Role,
}

/// Driven port for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; duplicates surface as
    /// [`UserPersistenceError::DuplicateEmail`].
    async fn insert(&self, user: NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by login email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Every registered user, in registration order.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Replace the stored credential.
    async fn update_password(
        &self,
        id: &UserId,
        password_hash: &str,
    ) -> Result<(), UserPersistenceError>;

    /// Apply a field-presence profile patch inside one unit of work and
    /// return the updated user, or `None` when the id is unknown.
    async fn update_profile(
        &self,
        id: &UserId,
        patch: &ProfileUpdate,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Set the role, returning the updated user or `None` when unknown.
    async fn set_role(&self, id: &UserId, role: Role) -> Result<Option<User>, UserPersistenceError>;
}
