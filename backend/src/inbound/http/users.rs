//! User-facing handlers: stats, password changes, and profiles.

use actix_web::{get, put, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::domain::stats::UserStats;
use crate::domain::user::{ProfileUpdate, PublicProfile, UserId};
use crate::domain::Error;
use crate::inbound::http::auth::CurrentUser;
use crate::inbound::http::schemas::{explicit_option, UserResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Password change request body.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct PasswordChangeRequest {
    /// The password currently on file.
    pub current_password: String,
    /// Replacement password, at least 8 characters.
    pub new_password: String,
}

/// Field-presence profile patch body.
///
/// Absent keys leave fields unchanged; explicit `null` clears; any supplied
/// string — including an empty one — is written.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct ProfileUpdateRequest {
    /// Avatar image URL.
    #[serde(default, deserialize_with = "explicit_option")]
    #[schema(value_type = Option<String>)]
    pub avatar_url: Option<Option<String>>,
    /// Free-text biography.
    #[serde(default, deserialize_with = "explicit_option")]
    #[schema(value_type = Option<String>)]
    pub bio: Option<Option<String>>,
    /// GitHub profile link.
    #[serde(default, deserialize_with = "explicit_option")]
    #[schema(value_type = Option<String>)]
    pub github_link: Option<Option<String>>,
    /// LinkedIn profile link.
    #[serde(default, deserialize_with = "explicit_option")]
    #[schema(value_type = Option<String>)]
    pub linkedin_link: Option<Option<String>>,
    /// Studio or team name.
    #[serde(default, deserialize_with = "explicit_option")]
    #[schema(value_type = Option<String>)]
    pub studio_name: Option<Option<String>>,
}

impl From<ProfileUpdateRequest> for ProfileUpdate {
    fn from(value: ProfileUpdateRequest) -> Self {
        Self {
            avatar_url: value.avatar_url,
            bio: value.bio,
            github_link: value.github_link,
            linkedin_link: value.linkedin_link,
            studio_name: value.studio_name,
        }
    }
}

/// The caller's own submission statistics.
#[utoipa::path(
    get,
    path = "/api/users/me/stats",
    responses(
        (status = 200, description = "Submission counters", body = UserStats),
        (status = 401, description = "Unauthenticated", body = Error)
    ),
    tags = ["users"],
    operation_id = "myStats"
)]
#[get("/users/me/stats")]
pub async fn my_stats(
    user: CurrentUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<UserStats>> {
    let stats = state.stats.for_user(&user.into_inner().id).await?;
    Ok(web::Json(stats))
}

/// Change the caller's password.
#[utoipa::path(
    put,
    path = "/api/users/me/password",
    request_body = PasswordChangeRequest,
    responses(
        (status = 200, description = "Password updated"),
        (status = 400, description = "Wrong current password or reuse", body = Error),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 422, description = "New password too short", body = Error)
    ),
    tags = ["users"],
    operation_id = "changePassword"
)]
#[put("/users/me/password")]
pub async fn change_password(
    user: CurrentUser,
    state: web::Data<HttpState>,
    payload: web::Json<PasswordChangeRequest>,
) -> ApiResult<HttpResponse> {
    state
        .accounts
        .change_password(
            &user.into_inner(),
            &payload.current_password,
            &payload.new_password,
        )
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Password updated successfully." })))
}

/// Apply a field-presence patch to the caller's profile.
#[utoipa::path(
    put,
    path = "/api/users/me/profile",
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 422, description = "Invalid link", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateProfile"
)]
#[put("/users/me/profile")]
pub async fn update_profile(
    user: CurrentUser,
    state: web::Data<HttpState>,
    payload: web::Json<ProfileUpdateRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let updated = state
        .accounts
        .update_profile(&user.into_inner(), payload.into_inner().into())
        .await?;
    Ok(web::Json(UserResponse::from(updated)))
}

/// Public profile lookup; the only unauthenticated read.
#[utoipa::path(
    get,
    path = "/api/users/{id}/profile",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Public profile", body = PublicProfile),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["users"],
    operation_id = "publicProfile",
    security([])
)]
#[get("/users/{id}/profile")]
pub async fn public_profile(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PublicProfile>> {
    let id = UserId::new(path.into_inner()).map_err(|_| Error::not_found("User not found"))?;
    let profile = state.accounts.public_profile(&id).await?;
    Ok(web::Json(profile))
}
