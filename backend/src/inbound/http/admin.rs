//! Admin handlers; the whole scope sits behind the admin role guard.

use actix_web::{get, patch, post, web, HttpResponse};
use pagination::{Page, PageQuery};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::idea::EvaluationStatus;
use crate::domain::stats::AdminStats;
use crate::domain::user::{Role, UserId};
use crate::domain::{Error, UserWithStats};
use crate::inbound::http::auth::CurrentUser;
use crate::inbound::http::schemas::{IdeaDetailResponse, IdeaResponse, TodoResponse, UserResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::todos::TodoCreateRequest;
use crate::inbound::http::ApiResult;

/// Evaluation request body.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct EvaluateRequest {
    /// Either `accepted` or `rejected`.
    pub status: String,
    /// Optional comment shown to the owner.
    pub admin_comment: Option<String>,
}

/// Role change request body.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RoleChangeRequest {
    /// Either `submitter` or `admin`.
    pub role: String,
}

fn parse_user_id(raw: String) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|_| Error::not_found("User not found"))
}

/// Page through every idea in the portal.
#[utoipa::path(
    get,
    path = "/api/admin/ideas",
    params(
        ("skip" = Option<i64>, Query, description = "Rows to skip"),
        ("limit" = Option<i64>, Query, description = "Maximum rows, clamped to 100")
    ),
    responses(
        (status = 200, description = "All ideas", body = [IdeaResponse]),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Caller is not an admin", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listAllIdeas"
)]
#[get("/ideas")]
pub async fn list_all_ideas(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Vec<IdeaResponse>>> {
    let page =
        Page::try_from(query.into_inner()).map_err(|err| Error::validation(err.to_string()))?;
    let ideas = state.ideas.list_all(page).await?;
    Ok(web::Json(ideas.into_iter().map(IdeaResponse::from).collect()))
}

/// Evaluate an idea: set status, comment, and reviewer.
#[utoipa::path(
    patch,
    path = "/api/admin/ideas/{id}/evaluate",
    params(("id" = Uuid, Path, description = "Idea identifier")),
    request_body = EvaluateRequest,
    responses(
        (status = 200, description = "Evaluated idea with identities", body = IdeaDetailResponse),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Caller is not an admin", body = Error),
        (status = 404, description = "Unknown idea", body = Error),
        (status = 422, description = "Status is not accepted/rejected", body = Error)
    ),
    tags = ["admin"],
    operation_id = "evaluateIdea"
)]
#[patch("/ideas/{id}/evaluate")]
pub async fn evaluate_idea(
    user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<EvaluateRequest>,
) -> ApiResult<web::Json<IdeaDetailResponse>> {
    let EvaluateRequest {
        status,
        admin_comment,
    } = payload.into_inner();
    let status = EvaluationStatus::parse(&status)?;
    let detail = state
        .ideas
        .evaluate(path.into_inner(), status, admin_comment, &user.into_inner())
        .await?;
    Ok(web::Json(detail.into()))
}

/// System-wide statistics with the sparse daily submission series.
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    responses(
        (status = 200, description = "Portal statistics", body = AdminStats),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Caller is not an admin", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminStats"
)]
#[get("/stats")]
pub async fn admin_stats(state: web::Data<HttpState>) -> ApiResult<web::Json<AdminStats>> {
    Ok(web::Json(state.stats.system().await?))
}

/// Every user joined with their own idea counters.
#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses(
        (status = 200, description = "Users with counters", body = [UserWithStats]),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Caller is not an admin", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserWithStats>>> {
    Ok(web::Json(state.accounts.list_users_with_stats().await?))
}

/// Change another user's role; self-changes are rejected.
#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}/role",
    params(("id" = String, Path, description = "Target user identifier")),
    request_body = RoleChangeRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Self role change", body = Error),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Caller is not an admin", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 422, description = "Unknown role value", body = Error)
    ),
    tags = ["admin"],
    operation_id = "setUserRole"
)]
#[patch("/users/{id}/role")]
pub async fn set_user_role(
    user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<RoleChangeRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let target = parse_user_id(path.into_inner())?;
    let role = Role::parse(&payload.role)?;
    let updated = state
        .accounts
        .set_role(&user.into_inner(), &target, role)
        .await?;
    Ok(web::Json(UserResponse::from(updated)))
}

/// Assign a todo to another user, notifying them.
#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/todos",
    params(("id" = String, Path, description = "Target user identifier")),
    request_body = TodoCreateRequest,
    responses(
        (status = 201, description = "Assigned todo", body = TodoResponse),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Caller is not an admin", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 422, description = "Blank title", body = Error)
    ),
    tags = ["admin"],
    operation_id = "assignTodo"
)]
#[post("/users/{id}/todos")]
pub async fn assign_todo(
    user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<TodoCreateRequest>,
) -> ApiResult<HttpResponse> {
    let target = parse_user_id(path.into_inner())?;
    let draft = payload.into_inner().into_draft()?;
    let todo = state
        .todos
        .assign(&user.into_inner(), &target, draft)
        .await?;
    Ok(HttpResponse::Created().json(TodoResponse::from(todo)))
}
