//! HTTP inbound adapter exposing the REST surface.

pub mod admin;
pub mod auth;
pub mod auth_routes;
pub mod error;
pub mod events;
pub mod ideas;
pub mod notifications;
pub mod schemas;
pub mod state;
pub mod todos;
pub mod users;

pub use error::ApiResult;

use actix_web::web;

use crate::middleware::RequireRole;

/// Register every route under `/api`.
///
/// The admin scope is wrapped in the admin role guard; everything else
/// authenticates through the `CurrentUser` extractor, except the three
/// deliberately public endpoints (register, login, public profile).
pub fn configure(cfg: &mut web::ServiceConfig) {
    let admin_scope = web::scope("/admin")
        .wrap(RequireRole::admin())
        .service(admin::list_all_ideas)
        .service(admin::evaluate_idea)
        .service(admin::admin_stats)
        .service(admin::list_users)
        .service(admin::set_user_role)
        .service(admin::assign_todo);

    let api = web::scope("/api")
        .service(auth_routes::register)
        .service(auth_routes::login)
        .service(auth_routes::me)
        .service(ideas::create_idea)
        .service(ideas::list_my_ideas)
        .service(ideas::get_idea)
        .service(users::my_stats)
        .service(users::change_password)
        .service(users::update_profile)
        .service(users::public_profile)
        .service(todos::list_todos)
        .service(todos::create_todo)
        .service(todos::update_todo)
        .service(todos::delete_todo)
        .service(events::list_events)
        .service(events::create_event)
        .service(notifications::list_notifications)
        .service(notifications::mark_notifications_read)
        .service(admin_scope);

    cfg.service(api);
}
