//! Diesel/PostgreSQL persistence adapters.

mod diesel_event_repository;
mod diesel_idea_repository;
mod diesel_notification_repository;
mod diesel_todo_repository;
mod diesel_user_repository;
pub(crate) mod models;
mod pool;
pub(crate) mod schema;

pub use diesel_event_repository::DieselEventRepository;
pub use diesel_idea_repository::DieselIdeaRepository;
pub use diesel_notification_repository::DieselNotificationRepository;
pub use diesel_todo_repository::DieselTodoRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
