//! Security adapters: password hashing and bearer-token issuance.

mod argon2_hasher;
mod bearer_tokens;

pub use argon2_hasher::Argon2CredentialHasher;
pub use bearer_tokens::DieselTokenIssuer;
