//! Profile patch semantics and the public profile lookup.

mod support;

use actix_web::test;
use serde_json::{json, Value};

use backend::test_support::TestHarness;
use support::{auth, portal_app, register_login};

async fn me_id(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    token: &str,
) -> String {
    let me: Value = test::read_body_json(
        test::call_service(
            app,
            test::TestRequest::get()
                .uri("/api/auth/me")
                .insert_header(auth(token))
                .to_request(),
        )
        .await,
    )
    .await;
    me["id"].as_str().expect("id present").to_owned()
}

#[actix_rt::test]
async fn profile_updates_only_touch_supplied_fields() {
    let harness = TestHarness::new();
    let app = test::init_service(portal_app(&harness)).await;
    let token = register_login(&app, "social@x.com", "password").await;

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/users/me/profile")
            .insert_header(auth(&token))
            .set_json(json!({
                "avatar_url": "https://example.com/avatar.png",
                "bio": "Senior Engineer",
                "github_link": "https://github.com/user",
                "linkedin_link": "https://linkedin.com/in/user"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 200);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["avatar_url"], "https://example.com/avatar.png");
    assert_eq!(body["bio"], "Senior Engineer");

    // Patch only the bio; the avatar survives.
    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/users/me/profile")
            .insert_header(auth(&token))
            .set_json(json!({ "bio": "X" }))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["bio"], "X");
    assert_eq!(body["avatar_url"], "https://example.com/avatar.png");

    // Explicit null clears; empty string writes.
    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/users/me/profile")
            .insert_header(auth(&token))
            .set_json(json!({ "avatar_url": null, "bio": "" }))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(res).await;
    assert!(body["avatar_url"].is_null());
    assert_eq!(body["bio"], "");

    // No fields at all is a no-op.
    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/users/me/profile")
            .insert_header(auth(&token))
            .set_json(json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 200);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["bio"], "");
}

#[actix_rt::test]
async fn malformed_links_fail_validation() {
    let harness = TestHarness::new();
    let app = test::init_service(portal_app(&harness)).await;
    let token = register_login(&app, "social@x.com", "password").await;

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/users/me/profile")
            .insert_header(auth(&token))
            .set_json(json!({ "github_link": "not a url" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 422);
}

#[actix_rt::test]
async fn profile_update_requires_auth() {
    let harness = TestHarness::new();
    let app = test::init_service(portal_app(&harness)).await;
    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/users/me/profile")
            .set_json(json!({ "bio": "Anon" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 401);
}

#[actix_rt::test]
async fn public_profile_is_readable_without_auth_and_reduced() {
    let harness = TestHarness::new();
    let app = test::init_service(portal_app(&harness)).await;
    let token = register_login(&app, "public@x.com", "password").await;

    test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/users/me/profile")
            .insert_header(auth(&token))
            .set_json(json!({ "bio": "Public bio", "github_link": "https://github.com/pub" }))
            .to_request(),
    )
    .await;
    let id = me_id(&app, &token).await;

    // No Authorization header on purpose.
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/users/{id}/profile"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 200);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["email"], "public@x.com");
    assert_eq!(body["bio"], "Public bio");
    assert_eq!(body["github_link"], "https://github.com/pub");
    assert!(body.get("role").is_none());
    assert!(body.get("password_hash").is_none());
}

#[actix_rt::test]
async fn unknown_public_profiles_miss() {
    let harness = TestHarness::new();
    let app = test::init_service(portal_app(&harness)).await;
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/users/nonexistent-id/profile")
            .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 404);
}
