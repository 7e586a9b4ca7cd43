//! Port abstraction for the opaque password-hashing capability.
//!
//! The domain never sees hashing internals: it hands a raw password in and
//! gets an opaque credential back, or asks whether a password matches one.

use super::define_port_error;

define_port_error! {
    /// Failures raised by credential hashing adapters.
    pub enum CredentialHashError {
        /// Hashing or verification could not run.
        Hash { message: String } => "credential hashing failed: {message}",
    }
}

/// Driven port turning raw passwords into stored credentials and back.
pub trait CredentialHasher: Send + Sync {
    /// Hash a raw password into an opaque credential.
    fn hash(&self, password: &str) -> Result<String, CredentialHashError>;

    /// Check a raw password against a stored credential.
    fn verify(&self, password: &str, credential: &str) -> Result<bool, CredentialHashError>;
}
