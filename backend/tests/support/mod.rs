//! Shared helpers for the HTTP-level integration suites.
//!
//! Everything a client can do goes through the HTTP surface; the harness
//! handles are only used for what the original fixtures did out of band
//! (promoting admins, inspecting stored rows).
#![allow(dead_code)] // each suite uses a different subset

use actix_http::Request;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{test, web, App};
use serde_json::Value;

use backend::domain::ports::UserRepository;
use backend::domain::user::Role;
use backend::test_support::TestHarness;

/// Build the full portal app over the harness state.
pub fn portal_app(
    harness: &TestHarness,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    App::new()
        .app_data(web::Data::new(harness.http_state()))
        .configure(backend::inbound::http::configure)
}

/// Register an account; returns the raw response.
pub async fn register<S>(app: &S, email: &str, password: &str) -> ServiceResponse
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(serde_json::json!({ "email": email, "password": password }))
            .to_request(),
    )
    .await
}

/// Log in and return the bearer token.
pub async fn login<S>(app: &S, email: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_form([("username", email), ("password", password)])
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "login failed: {}", res.status());
    let body: Value = test::read_body_json(res).await;
    body.get("access_token")
        .and_then(Value::as_str)
        .expect("access_token present")
        .to_owned()
}

/// Register then log in; returns the bearer token.
pub async fn register_login<S>(app: &S, email: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = register(app, email, password).await;
    assert_eq!(res.status().as_u16(), 201, "registration failed");
    login(app, email, password).await
}

/// Promote an already-registered account to admin, harness-side.
pub async fn make_admin(harness: &TestHarness, email: &str) {
    let user = harness
        .users
        .find_by_email(email)
        .await
        .expect("lookup succeeds")
        .expect("user registered");
    harness
        .users
        .set_role(&user.id, Role::Admin)
        .await
        .expect("promotion succeeds");
}

/// `Authorization` header tuple for a bearer token.
pub fn auth(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

const BOUNDARY: &str = "portal-test-boundary";

/// Assemble a `multipart/form-data` body for the idea submission form.
pub fn idea_form(
    fields: &[(&str, &str)],
    attachment: Option<(&str, &[u8])>,
) -> (String, Vec<u8>) {
    let mut body: Vec<u8> = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                .as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    if let Some((filename, bytes)) = attachment {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"attachment\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

/// Submit an idea over the API; returns the response.
pub async fn submit_idea<S>(
    app: &S,
    token: &str,
    title: &str,
    description: &str,
    category: &str,
) -> ServiceResponse
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (content_type, body) = idea_form(
        &[
            ("title", title),
            ("description", description),
            ("category", category),
        ],
        None,
    );
    test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/ideas")
            .insert_header(auth(token))
            .insert_header(("Content-Type", content_type))
            .set_payload(body)
            .to_request(),
    )
    .await
}
