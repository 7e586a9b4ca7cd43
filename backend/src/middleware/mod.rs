//! Actix middleware: request tracing and role-gated scopes.

pub mod role_guard;
pub mod trace;

pub use role_guard::RequireRole;
pub use trace::Trace;
