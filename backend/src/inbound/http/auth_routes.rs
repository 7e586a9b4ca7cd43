//! Registration, login, and current-user handlers.
//!
//! ```text
//! POST /api/auth/register {"email":"a@x.com","password":"secret"}
//! POST /api/auth/login    (form: username, password)
//! GET  /api/auth/me
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{Error, IssuedToken, LoginCredentials, LoginValidationError};
use crate::inbound::http::auth::CurrentUser;
use crate::inbound::http::schemas::UserResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Registration request body.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    /// Login email; must be unique.
    pub email: String,
    /// Raw password.
    pub password: String,
}

/// Login form body, OAuth2 password-flow style.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginForm {
    /// The login email.
    pub username: String,
    /// Raw password.
    pub password: String,
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::validation("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::validation("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Register a new submitter account.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Duplicate email", body = Error),
        (status = 422, description = "Malformed email or password", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let user = state
        .accounts
        .register(&payload.email, &payload.password)
        .await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Authenticate and mint a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    responses(
        (status = 200, description = "Login success", body = IssuedToken),
        (status = 401, description = "Incorrect email or password", body = Error),
        (status = 422, description = "Missing form fields", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Form<LoginForm>,
) -> ApiResult<web::Json<IssuedToken>> {
    let credentials = LoginCredentials::try_from_parts(&payload.username, &payload.password)
        .map_err(map_login_validation_error)?;
    let token = state.accounts.login(&credentials).await?;
    Ok(web::Json(token))
}

/// The authenticated caller's own record.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthenticated", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentUser"
)]
#[get("/auth/me")]
pub async fn me(user: CurrentUser) -> ApiResult<web::Json<UserResponse>> {
    Ok(web::Json(UserResponse::from(user.into_inner())))
}
