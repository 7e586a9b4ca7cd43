//! OpenAPI document assembled from handler annotations.

use utoipa::OpenApi;

use crate::domain::auth::IssuedToken;
use crate::domain::error::Error;
use crate::domain::stats::{AdminStats, DailyCount, UserStats};
use crate::domain::user::PublicProfile;
use crate::domain::UserWithStats;
use crate::inbound::http::schemas::{
    EventResponse, IdeaDetailResponse, IdeaResponse, NotificationResponse, TodoResponse,
    UserResponse,
};
use crate::inbound::http::{admin, auth_routes, events, ideas, notifications, todos, users};

/// Aggregated OpenAPI description of the portal API.
#[derive(OpenApi)]
#[openapi(
    paths(
        auth_routes::register,
        auth_routes::login,
        auth_routes::me,
        ideas::create_idea,
        ideas::list_my_ideas,
        ideas::get_idea,
        users::my_stats,
        users::change_password,
        users::update_profile,
        users::public_profile,
        todos::list_todos,
        todos::create_todo,
        todos::update_todo,
        todos::delete_todo,
        events::list_events,
        events::create_event,
        notifications::list_notifications,
        notifications::mark_notifications_read,
        admin::list_all_ideas,
        admin::evaluate_idea,
        admin::admin_stats,
        admin::list_users,
        admin::set_user_role,
        admin::assign_todo,
    ),
    components(schemas(
        Error,
        IssuedToken,
        UserResponse,
        PublicProfile,
        UserWithStats,
        UserStats,
        AdminStats,
        DailyCount,
        IdeaResponse,
        IdeaDetailResponse,
        TodoResponse,
        EventResponse,
        NotificationResponse,
    )),
    tags(
        (name = "auth", description = "Registration and authentication"),
        (name = "ideas", description = "Idea submission and review"),
        (name = "users", description = "Profiles, passwords, statistics"),
        (name = "todos", description = "Per-user task list"),
        (name = "events", description = "Per-user calendar"),
        (name = "notifications", description = "Pull-based notification feed"),
        (name = "admin", description = "Admin-only operations"),
    )
)]
pub struct ApiDoc;
