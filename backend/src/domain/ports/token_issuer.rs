//! Port abstraction for bearer-credential issuance and resolution.

use async_trait::async_trait;

use crate::domain::user::UserId;

use super::define_port_error;

define_port_error! {
    /// Failures raised by token issuance adapters.
    pub enum TokenIssuerError {
        /// Token store connection could not be established.
        Connection { message: String } => "token store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "token store query failed: {message}",
    }
}

/// Driven port for the opaque bearer-credential capability.
///
/// `issue` returns the raw token exactly once; adapters persist only a
/// fingerprint. `resolve` answers `None` for unknown, malformed, or expired
/// tokens — the distinction is deliberately not observable.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Mint a bearer token naming the given user.
    async fn issue(&self, user: &UserId) -> Result<String, TokenIssuerError>;

    /// Resolve a presented token to the user it names.
    async fn resolve(&self, token: &str) -> Result<Option<UserId>, TokenIssuerError>;
}
