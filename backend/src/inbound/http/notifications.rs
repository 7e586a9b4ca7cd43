//! Notification feed handlers.

use actix_web::{get, patch, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::domain::Error;
use crate::inbound::http::auth::CurrentUser;
use crate::inbound::http::schemas::NotificationResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Feed query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    /// Maximum rows to return; defaults to 20.
    pub limit: Option<i64>,
}

/// The caller's notifications, newest first.
#[utoipa::path(
    get,
    path = "/api/notifications",
    params(("limit" = Option<i64>, Query, description = "Maximum rows, default 20")),
    responses(
        (status = 200, description = "Recent notifications", body = [NotificationResponse]),
        (status = 401, description = "Unauthenticated", body = Error)
    ),
    tags = ["notifications"],
    operation_id = "listNotifications"
)]
#[get("/notifications")]
pub async fn list_notifications(
    user: CurrentUser,
    state: web::Data<HttpState>,
    query: web::Query<FeedQuery>,
) -> ApiResult<web::Json<Vec<NotificationResponse>>> {
    let feed = state
        .notifications
        .list(&user.into_inner().id, query.limit)
        .await?;
    Ok(web::Json(
        feed.into_iter().map(NotificationResponse::from).collect(),
    ))
}

/// Flip every unread notification for the caller; idempotent.
#[utoipa::path(
    patch,
    path = "/api/notifications/read",
    responses(
        (status = 200, description = "All notifications marked read"),
        (status = 401, description = "Unauthenticated", body = Error)
    ),
    tags = ["notifications"],
    operation_id = "markNotificationsRead"
)]
#[patch("/notifications/read")]
pub async fn mark_notifications_read(
    user: CurrentUser,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    state
        .notifications
        .mark_all_read(&user.into_inner().id)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "All notifications marked as read." })))
}
