//! Account use-cases: registration, login, passwords, profiles, and roles.

use std::sync::Arc;

use serde::Serialize;
use zeroize::Zeroizing;

use crate::domain::auth::{IssuedToken, LoginCredentials};
use crate::domain::auth_service::AuthGate;
use crate::domain::ports::{
    CredentialHashError, CredentialHasher, IdeaPersistenceError, IdeaRepository, NewUser,
    TokenIssuer, TokenIssuerError, UserPersistenceError, UserRepository,
};
use crate::domain::stats::{self, UserStats};
use crate::domain::user::{Email, ProfileUpdate, PublicProfile, Role, User, UserId};
use crate::domain::Error;

/// Minimum length accepted for a replacement password.
pub const NEW_PASSWORD_MIN: usize = 8;

/// A user row joined with their own idea counters, for the admin listing.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct UserWithStats {
    /// Stable identifier.
    #[schema(value_type = String)]
    pub id: UserId,
    /// Login email.
    #[schema(value_type = String)]
    pub email: Email,
    /// Portal role.
    pub role: Role,
    /// Deactivated users cannot authenticate.
    pub is_active: bool,
    /// The user's own idea counters.
    #[serde(flatten)]
    pub stats: UserStats,
}

/// Account service implementing the identity-facing use-cases.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    ideas: Arc<dyn IdeaRepository>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::DuplicateEmail => Error::invalid_request("Email already registered"),
    }
}

fn map_idea_error(error: IdeaPersistenceError) -> Error {
    match error {
        IdeaPersistenceError::Connection { message } => Error::service_unavailable(message),
        IdeaPersistenceError::Query { message } => Error::internal(message),
    }
}

fn map_hash_error(error: CredentialHashError) -> Error {
    let CredentialHashError::Hash { message } = error;
    Error::internal(format!("credential hashing failed: {message}"))
}

fn map_token_error(error: TokenIssuerError) -> Error {
    match error {
        TokenIssuerError::Connection { message } => Error::service_unavailable(message),
        TokenIssuerError::Query { message } => Error::internal(message),
    }
}

impl AccountService {
    /// Create the service over its ports.
    pub fn new(
        users: Arc<dyn UserRepository>,
        ideas: Arc<dyn IdeaRepository>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            ideas,
            hasher,
            tokens,
        }
    }

    /// Register a new submitter account.
    ///
    /// Duplicate emails surface as `InvalidRequest`; the unique constraint is
    /// the arbiter, so there is no check-then-insert race window.
    pub async fn register(&self, email: &str, password: &str) -> Result<User, Error> {
        let email = Email::new(email)?;
        if password.is_empty() {
            return Err(Error::validation("password must not be empty"));
        }
        let password_hash = self.hasher.hash(password).map_err(map_hash_error)?;
        self.users
            .insert(NewUser {
                id: UserId::random(),
                email,
                password_hash,
                role: Role::Submitter,
            })
            .await
            .map_err(map_user_error)
    }

    /// Authenticate credentials and mint a bearer token.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<IssuedToken, Error> {
        let user = self
            .users
            .find_by_email(credentials.username())
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized("Incorrect email or password"))?;

        let verified = self
            .hasher
            .verify(credentials.password(), &user.password_hash)
            .map_err(map_hash_error)?;
        if !verified || !user.is_active {
            return Err(Error::unauthorized("Incorrect email or password"));
        }

        let token = self
            .tokens
            .issue(&user.id)
            .await
            .map_err(map_token_error)?;
        Ok(IssuedToken::bearer(token))
    }

    /// Change the caller's password.
    ///
    /// The new password must be at least [`NEW_PASSWORD_MIN`] characters,
    /// the current password must verify, and the new password must differ.
    pub async fn change_password(
        &self,
        user: &User,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), Error> {
        let new_password = Zeroizing::new(new_password.to_owned());
        if new_password.chars().count() < NEW_PASSWORD_MIN {
            return Err(Error::validation(format!(
                "New password must be at least {NEW_PASSWORD_MIN} characters"
            )));
        }

        let current_ok = self
            .hasher
            .verify(current_password, &user.password_hash)
            .map_err(map_hash_error)?;
        if !current_ok {
            return Err(Error::invalid_request("Current password is incorrect."));
        }

        let reused = self
            .hasher
            .verify(&new_password, &user.password_hash)
            .map_err(map_hash_error)?;
        if reused {
            return Err(Error::invalid_request(
                "New password must differ from the current password.",
            ));
        }

        let new_hash = self.hasher.hash(&new_password).map_err(map_hash_error)?;
        self.users
            .update_password(&user.id, &new_hash)
            .await
            .map_err(map_user_error)
    }

    /// Apply a field-presence profile patch and return the updated user.
    ///
    /// An empty patch is a no-op that returns the stored row unchanged.
    pub async fn update_profile(&self, user: &User, patch: ProfileUpdate) -> Result<User, Error> {
        patch.validate()?;
        if patch.is_empty() {
            return Ok(user.clone());
        }
        self.users
            .update_profile(&user.id, &patch)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("User not found"))
    }

    /// Unauthenticated public-profile lookup.
    pub async fn public_profile(&self, id: &UserId) -> Result<PublicProfile, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .map(|user| user.public_profile())
            .ok_or_else(|| Error::not_found("User not found"))
    }

    /// Admin-only role change; self-changes are rejected upstream and here.
    pub async fn set_role(
        &self,
        caller: &User,
        target: &UserId,
        role: Role,
    ) -> Result<User, Error> {
        AuthGate::forbid_self_role_change(&caller.id, target)?;
        self.users
            .set_role(target, role)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("User not found"))
    }

    /// Every user joined with their own idea counters.
    pub async fn list_users_with_stats(&self) -> Result<Vec<UserWithStats>, Error> {
        let users = self.users.list_all().await.map_err(map_user_error)?;
        let mut rows = Vec::with_capacity(users.len());
        for user in users {
            let statuses = self
                .ideas
                .statuses_for_owner(&user.id)
                .await
                .map_err(map_idea_error)?;
            rows.push(UserWithStats {
                id: user.id,
                email: user.email,
                role: user.role,
                is_active: user.is_active,
                stats: stats::summarize(&statuses),
            });
        }
        Ok(rows)
    }
}
