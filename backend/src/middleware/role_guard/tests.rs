//! Role guard behaviour over an in-memory state bundle.

use actix_web::http::StatusCode;
use actix_web::{test, web, App, HttpResponse};

use super::*;
use crate::domain::ports::TokenIssuer as _;
use crate::domain::user::Email;
use crate::domain::UserId;
use crate::inbound::http::auth::CurrentUser;
use crate::test_support::TestHarness;

async fn seeded_token(harness: &TestHarness, email: &str, role: Role) -> String {
    let user = User {
        id: UserId::random(),
        email: Email::new(email).expect("valid email"),
        password_hash: "plain$password".to_owned(),
        role,
        is_active: true,
        avatar_url: None,
        bio: None,
        github_link: None,
        linkedin_link: None,
        studio_name: None,
    };
    harness.users.seed(user.clone());
    harness.tokens.issue(&user.id).await.expect("token issues")
}

fn guarded_app(
    state: web::Data<HttpState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(state).service(
        web::scope("/admin").wrap(RequireRole::admin()).route(
            "/ping",
            web::get().to(|user: CurrentUser| async move {
                HttpResponse::Ok().body(user.into_inner().email.to_string())
            }),
        ),
    )
}

#[actix_web::test]
async fn missing_credentials_are_unauthorized() {
    let harness = TestHarness::new();
    let app = test::init_service(guarded_app(web::Data::new(harness.http_state()))).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/admin/ping").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn submitters_are_forbidden() {
    let harness = TestHarness::new();
    let token = seeded_token(&harness, "user@x.com", Role::Submitter).await;
    let app = test::init_service(guarded_app(web::Data::new(harness.http_state()))).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/admin/ping")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn admins_pass_and_handlers_see_the_resolved_user() {
    let harness = TestHarness::new();
    let token = seeded_token(&harness, "admin@x.com", Role::Admin).await;
    let app = test::init_service(guarded_app(web::Data::new(harness.http_state()))).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/admin/ping")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = test::read_body(res).await;
    assert_eq!(body, "admin@x.com".as_bytes());
}
