//! Deterministic in-memory adapters for unit and integration tests.
//!
//! Exposed behind the `test-support` feature so integration suites can wire a
//! full HTTP application without a database. Every adapter implements the
//! same port contract the Diesel adapters do, including ownership scoping and
//! duplicate-email detection.

mod fixtures;
mod memory;

pub use fixtures::TestHarness;
pub use memory::{
    InMemoryAttachments, InMemoryEvents, InMemoryIdeas, InMemoryNotifications, InMemoryTodos,
    InMemoryTokens, InMemoryUsers, PlainCredentialHasher,
};
