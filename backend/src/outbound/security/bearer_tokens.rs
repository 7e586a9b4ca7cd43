//! DB-backed opaque bearer tokens.
//!
//! A token is 32 random bytes, hex-encoded, returned to the client exactly
//! once. Only its SHA-256 fingerprint lands in the `access_tokens` table, so
//! a leaked database dump cannot be replayed as credentials. Resolution
//! fingerprints the presented token, checks expiry, and never distinguishes
//! unknown from expired.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::domain::ports::{TokenIssuer, TokenIssuerError};
use crate::domain::user::UserId;
use crate::outbound::persistence::models::{AccessTokenRow, NewAccessTokenRow};
use crate::outbound::persistence::schema::access_tokens;
use crate::outbound::persistence::{DbPool, PoolError};

/// Default token lifetime in minutes.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60 * 24;

/// Diesel-backed implementation of the `TokenIssuer` port.
#[derive(Clone)]
pub struct DieselTokenIssuer {
    pool: DbPool,
    ttl: Duration,
}

fn map_pool_error(error: PoolError) -> TokenIssuerError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            TokenIssuerError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> TokenIssuerError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            TokenIssuerError::connection("database connection error")
        }
        other => {
            debug!(error = %other, "token query failed");
            TokenIssuerError::query("database error")
        }
    }
}

/// SHA-256 hex fingerprint of a raw token.
fn fingerprint(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

impl DieselTokenIssuer {
    /// Create an issuer with the default token lifetime.
    pub fn new(pool: DbPool) -> Self {
        Self::with_ttl_minutes(pool, DEFAULT_TOKEN_TTL_MINUTES)
    }

    /// Create an issuer with a custom lifetime in minutes.
    pub fn with_ttl_minutes(pool: DbPool, minutes: i64) -> Self {
        Self {
            pool,
            ttl: Duration::minutes(minutes),
        }
    }
}

#[async_trait]
impl TokenIssuer for DieselTokenIssuer {
    async fn issue(&self, user: &UserId) -> Result<String, TokenIssuerError> {
        let mut bytes = [0_u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        let token = hex::encode(bytes);

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(access_tokens::table)
            .values(&NewAccessTokenRow {
                fingerprint: &fingerprint(&token),
                user_id: *user.as_uuid(),
                expires_at: Utc::now() + self.ttl,
            })
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(token)
    }

    async fn resolve(&self, token: &str) -> Result<Option<UserId>, TokenIssuerError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AccessTokenRow> = access_tokens::table
            .find(fingerprint(token))
            .select(AccessTokenRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row
            .filter(|row| row.expires_at > Utc::now())
            .map(|row| UserId::from_uuid(row.user_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprints_are_stable_and_hide_the_token() {
        let token = "deadbeef";
        let first = fingerprint(token);
        assert_eq!(first, fingerprint(token));
        assert_eq!(first.len(), 64);
        assert!(!first.contains(token));
    }
}
