//! Idea-submission portal backend.
//!
//! Submitters register, log in with bearer credentials, and submit ideas
//! with optional attachments; admins evaluate ideas, manage roles, and
//! assign todos. A hexagonal layout keeps the domain free of transport and
//! storage concerns: `domain` holds entities, services, and ports, `inbound`
//! adapts HTTP, `outbound` adapts PostgreSQL, hashing, tokens, and files.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
