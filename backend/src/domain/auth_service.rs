//! Authorization gate: bearer-credential resolution and role checks.

use std::sync::Arc;

use crate::domain::ports::{TokenIssuer, TokenIssuerError, UserPersistenceError, UserRepository};
use crate::domain::user::{Role, User, UserId};
use crate::domain::Error;

/// Resolves callers from bearer credentials and enforces role membership.
#[derive(Clone)]
pub struct AuthGate {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenIssuer>,
}

fn map_token_error(error: TokenIssuerError) -> Error {
    match error {
        TokenIssuerError::Connection { message } => Error::service_unavailable(message),
        TokenIssuerError::Query { message } => Error::internal(message),
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::DuplicateEmail => {
            Error::internal("unexpected duplicate email during lookup")
        }
    }
}

impl AuthGate {
    /// Create a gate over the given token and user ports.
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self { users, tokens }
    }

    /// Resolve a presented bearer token to the active user it names.
    ///
    /// Unknown, malformed, and expired tokens are indistinguishable to the
    /// caller; inactive users fail the same way.
    pub async fn resolve_bearer(&self, token: &str) -> Result<User, Error> {
        let user_id = self
            .tokens
            .resolve(token)
            .await
            .map_err(map_token_error)?
            .ok_or_else(|| Error::unauthorized("Could not validate credentials"))?;

        let user = self
            .users
            .find_by_id(&user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized("Could not validate credentials"))?;

        if !user.is_active {
            return Err(Error::unauthorized("Inactive user"));
        }
        Ok(user)
    }

    /// Fail with `Forbidden` unless the user's role is in the allowed set.
    pub fn require_role(user: &User, allowed: &[Role]) -> Result<(), Error> {
        if allowed.contains(&user.role) {
            Ok(())
        } else {
            Err(Error::forbidden("Operation not permitted"))
        }
    }

    /// Guard for role mutations: the target must not be the caller.
    pub fn forbid_self_role_change(caller: &UserId, target: &UserId) -> Result<(), Error> {
        if caller == target {
            Err(Error::invalid_request("You cannot change your own role"))
        } else {
            Ok(())
        }
    }
}
