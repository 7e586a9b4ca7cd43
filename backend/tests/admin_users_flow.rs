//! Admin gating, role management, and the users-with-stats listing.

mod support;

use actix_web::test;
use serde_json::{json, Value};

use backend::test_support::TestHarness;
use support::{auth, login, make_admin, portal_app, register_login, submit_idea};

#[actix_rt::test]
async fn admin_routes_are_role_gated() {
    let harness = TestHarness::new();
    let app = test::init_service(portal_app(&harness)).await;
    let submitter = register_login(&app, "user@x.com", "password").await;

    // No credential at all.
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/admin/stats").to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 401);

    // Valid credential, wrong role.
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/admin/stats")
            .insert_header(auth(&submitter))
            .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 403);
}

#[actix_rt::test]
async fn role_changes_are_idempotent_but_never_self_applied() {
    let harness = TestHarness::new();
    let app = test::init_service(portal_app(&harness)).await;

    register_login(&app, "super@x.com", "password").await;
    make_admin(&harness, "super@x.com").await;
    let admin = login(&app, "super@x.com", "password").await;
    let target = register_login(&app, "promote-me@x.com", "password").await;

    let target_me: Value = test::read_body_json(
        test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/auth/me")
                .insert_header(auth(&target))
                .to_request(),
        )
        .await,
    )
    .await;
    let target_id = target_me["id"].as_str().expect("id present").to_owned();

    // Promote, twice; both succeed with the same result.
    for _ in 0..2 {
        let res = test::call_service(
            &app,
            test::TestRequest::patch()
                .uri(&format!("/api/admin/users/{target_id}/role"))
                .insert_header(auth(&admin))
                .set_json(json!({ "role": "admin" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status().as_u16(), 200);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["role"], "admin");
    }

    // And back down again.
    let res = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/admin/users/{target_id}/role"))
            .insert_header(auth(&admin))
            .set_json(json!({ "role": "submitter" }))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["role"], "submitter");

    // Self-demotion is rejected.
    let admin_me: Value = test::read_body_json(
        test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/auth/me")
                .insert_header(auth(&admin))
                .to_request(),
        )
        .await,
    )
    .await;
    let admin_id = admin_me["id"].as_str().expect("id present").to_owned();
    let res = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/admin/users/{admin_id}/role"))
            .insert_header(auth(&admin))
            .set_json(json!({ "role": "submitter" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 400);
    let body: Value = test::read_body_json(res).await;
    assert!(body["message"]
        .as_str()
        .is_some_and(|m| m.contains("cannot change your own role")));

    // Unknown targets and unknown roles fail distinctly.
    let res = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/admin/users/{}/role", uuid::Uuid::new_v4()))
            .insert_header(auth(&admin))
            .set_json(json!({ "role": "admin" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 404);

    let res = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/admin/users/{target_id}/role"))
            .insert_header(auth(&admin))
            .set_json(json!({ "role": "root" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 422);
}

#[actix_rt::test]
async fn user_listing_joins_idea_counters() {
    let harness = TestHarness::new();
    let app = test::init_service(portal_app(&harness)).await;

    let submitter = register_login(&app, "user@x.com", "password").await;
    submit_idea(&app, &submitter, "Counted Idea", "Description for the idea.", "AI").await;
    register_login(&app, "admin@x.com", "password").await;
    make_admin(&harness, "admin@x.com").await;
    let admin = login(&app, "admin@x.com", "password").await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/admin/users")
            .insert_header(auth(&admin))
            .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 200);
    let users: Vec<Value> = test::read_body_json(res).await;
    assert_eq!(users.len(), 2);

    let submitter_row = users
        .iter()
        .find(|row| row["email"] == "user@x.com")
        .expect("submitter listed");
    assert_eq!(submitter_row["total"], 1);
    assert_eq!(submitter_row["accepted"], 0);
    assert_eq!(submitter_row["success_rate"], 0.0);
    assert_eq!(submitter_row["role"], "submitter");
}

#[actix_rt::test]
async fn admin_listing_applies_pagination_rules() {
    let harness = TestHarness::new();
    let app = test::init_service(portal_app(&harness)).await;

    let submitter = register_login(&app, "user@x.com", "password").await;
    for index in 0..3 {
        let res = submit_idea(
            &app,
            &submitter,
            &format!("Idea Number {index}"),
            "Description for the idea.",
            "AI",
        )
        .await;
        assert_eq!(res.status().as_u16(), 201);
    }
    register_login(&app, "admin@x.com", "password").await;
    make_admin(&harness, "admin@x.com").await;
    let admin = login(&app, "admin@x.com", "password").await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/admin/ideas?skip=1&limit=1")
            .insert_header(auth(&admin))
            .to_request(),
    )
    .await;
    let page: Vec<Value> = test::read_body_json(res).await;
    assert_eq!(page.len(), 1);

    // Oversized limits clamp instead of failing.
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/admin/ideas?limit=1000")
            .insert_header(auth(&admin))
            .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 200);
    let page: Vec<Value> = test::read_body_json(res).await;
    assert_eq!(page.len(), 3);

    // Negative offsets are a validation failure.
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/admin/ideas?skip=-1")
            .insert_header(auth(&admin))
            .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 422);
}
