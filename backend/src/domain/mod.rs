//! Domain entities, services, and ports.
//!
//! Everything in this module is transport- and storage-agnostic: entities
//! carry validated state, services implement the use-cases over ports, and
//! inbound/outbound adapters live elsewhere.

pub mod account_service;
pub mod auth;
pub mod auth_service;
pub mod error;
pub mod event;
pub mod event_service;
pub mod idea;
pub mod idea_service;
pub mod notification;
pub mod notification_service;
pub mod ports;
pub mod stats;
pub mod stats_service;
pub mod todo;
pub mod todo_service;
pub mod trace_id;
pub mod user;

pub use self::account_service::{AccountService, UserWithStats, NEW_PASSWORD_MIN};
pub use self::auth::{IssuedToken, LoginCredentials, LoginValidationError};
pub use self::auth_service::AuthGate;
pub use self::error::{Error, ErrorCode};
pub use self::event_service::EventService;
pub use self::idea_service::{AttachmentUpload, IdeaService};
pub use self::notification_service::{NotificationService, DEFAULT_FEED_LIMIT};
pub use self::stats_service::StatsService;
pub use self::todo_service::TodoService;
pub use self::trace_id::{TraceId, TRACE_ID_HEADER};
pub use self::user::{Email, ProfileUpdate, PublicProfile, Role, User, UserId};

/// Convenient result alias for domain operations.
pub type ApiResult<T> = Result<T, Error>;
