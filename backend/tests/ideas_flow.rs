//! Idea submission, listing scope, evaluation, and statistics flows.

mod support;

use actix_web::test;
use serde_json::{json, Value};

use backend::test_support::TestHarness;
use support::{auth, idea_form, make_admin, portal_app, register_login, submit_idea};

#[actix_rt::test]
async fn listing_returns_only_the_callers_ideas() {
    let harness = TestHarness::new();
    let app = test::init_service(portal_app(&harness)).await;

    let token_a = register_login(&app, "a@x.com", "password").await;
    let token_b = register_login(&app, "b@x.com", "password").await;

    let res = submit_idea(&app, &token_a, "Idea A Title", "Description for Idea A", "AI").await;
    assert_eq!(res.status().as_u16(), 201);
    let res = submit_idea(&app, &token_b, "Idea B Title", "Description for Idea B", "AI").await;
    assert_eq!(res.status().as_u16(), 201);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/ideas")
            .insert_header(auth(&token_a))
            .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 200);
    let ideas: Vec<Value> = test::read_body_json(res).await;
    assert_eq!(ideas.len(), 1);
    assert_eq!(ideas[0]["title"], "Idea A Title");
}

#[actix_rt::test]
async fn submission_validates_field_bounds() {
    let harness = TestHarness::new();
    let app = test::init_service(portal_app(&harness)).await;
    let token = register_login(&app, "a@x.com", "password").await;

    let res = submit_idea(&app, &token, "ab", "Description long enough.", "AI").await;
    assert_eq!(res.status().as_u16(), 422);

    let res = submit_idea(&app, &token, "A valid title", "too short", "AI").await;
    assert_eq!(res.status().as_u16(), 422);
}

#[actix_rt::test]
async fn attachments_are_stored_and_recorded() {
    let harness = TestHarness::new();
    let app = test::init_service(portal_app(&harness)).await;
    let token = register_login(&app, "a@x.com", "password").await;

    let (content_type, body) = idea_form(
        &[
            ("title", "Idea With File"),
            ("description", "Description for the attachment idea."),
            ("category", "AI"),
        ],
        Some(("pitch.pdf", b"%PDF-1.4 fake")),
    );
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/ideas")
            .insert_header(auth(&token))
            .insert_header(("Content-Type", content_type))
            .set_payload(body)
            .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 201);
    let created: Value = test::read_body_json(res).await;
    let file_path = created["file_path"].as_str().expect("file path recorded");
    assert!(file_path.starts_with("uploads/"));
    assert!(file_path.ends_with(".pdf"));
    assert_eq!(harness.attachments.saved_paths().len(), 1);
}

#[actix_rt::test]
async fn reads_are_owner_or_admin_gated() {
    let harness = TestHarness::new();
    let app = test::init_service(portal_app(&harness)).await;

    let owner = register_login(&app, "owner@x.com", "password").await;
    let stranger = register_login(&app, "stranger@x.com", "password").await;
    register_login(&app, "admin@x.com", "password").await;
    make_admin(&harness, "admin@x.com").await;
    let admin = support::login(&app, "admin@x.com", "password").await;

    let res = submit_idea(&app, &owner, "Private Idea", "Description for the idea.", "AI").await;
    let created: Value = test::read_body_json(res).await;
    let id = created["id"].as_str().expect("id present").to_owned();

    for (token, expected) in [(&owner, 200_u16), (&admin, 200), (&stranger, 403)] {
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/ideas/{id}"))
                .insert_header(auth(token))
                .to_request(),
        )
        .await;
        assert_eq!(res.status().as_u16(), expected);
    }

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/ideas/{}", uuid::Uuid::new_v4()))
            .insert_header(auth(&owner))
            .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 404);
}

#[actix_rt::test]
async fn evaluation_persists_and_resolves_identities() {
    let harness = TestHarness::new();
    let app = test::init_service(portal_app(&harness)).await;

    let owner = register_login(&app, "submitter@x.com", "password").await;
    register_login(&app, "reviewer@x.com", "password").await;
    make_admin(&harness, "reviewer@x.com").await;
    let admin = support::login(&app, "reviewer@x.com", "password").await;

    let res = submit_idea(&app, &owner, "Idea To Review", "A submission under review.", "AI").await;
    let created: Value = test::read_body_json(res).await;
    assert_eq!(created["status"], "submitted");
    assert!(created["reviewer"].is_null());
    let id = created["id"].as_str().expect("id present").to_owned();

    let res = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/admin/ideas/{id}/evaluate"))
            .insert_header(auth(&admin))
            .set_json(json!({ "status": "accepted", "admin_comment": "Great idea, well detailed." }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 200);
    let evaluated: Value = test::read_body_json(res).await;
    assert_eq!(evaluated["status"], "accepted");
    assert_eq!(evaluated["admin_comment"], "Great idea, well detailed.");
    assert_eq!(evaluated["reviewer"]["email"], "reviewer@x.com");
    assert_eq!(evaluated["owner"]["email"], "submitter@x.com");

    // The owner's subsequent fetch shows the same evaluation.
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/ideas/{id}"))
            .insert_header(auth(&owner))
            .to_request(),
    )
    .await;
    let fetched: Value = test::read_body_json(res).await;
    assert_eq!(fetched["status"], "accepted");
    assert_eq!(fetched["admin_comment"], "Great idea, well detailed.");
    assert_eq!(fetched["reviewer"]["email"], "reviewer@x.com");
}

#[actix_rt::test]
async fn evaluation_rejects_unknown_ids_and_bad_statuses() {
    let harness = TestHarness::new();
    let app = test::init_service(portal_app(&harness)).await;
    register_login(&app, "admin@x.com", "password").await;
    make_admin(&harness, "admin@x.com").await;
    let admin = support::login(&app, "admin@x.com", "password").await;

    let res = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!(
                "/api/admin/ideas/{}/evaluate",
                uuid::Uuid::new_v4()
            ))
            .insert_header(auth(&admin))
            .set_json(json!({ "status": "accepted" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 404);

    let owner = register_login(&app, "o@x.com", "password").await;
    let res = submit_idea(&app, &owner, "Some Idea", "Description for the idea.", "AI").await;
    let created: Value = test::read_body_json(res).await;
    let id = created["id"].as_str().expect("id present").to_owned();
    let res = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/admin/ideas/{id}/evaluate"))
            .insert_header(auth(&admin))
            .set_json(json!({ "status": "shelved" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 422);
}

#[actix_rt::test]
async fn fresh_users_see_zero_stats() {
    let harness = TestHarness::new();
    let app = test::init_service(portal_app(&harness)).await;
    let token = register_login(&app, "new@x.com", "password").await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/users/me/stats")
            .insert_header(auth(&token))
            .to_request(),
    )
    .await;
    let stats: Value = test::read_body_json(res).await;
    assert_eq!(stats["total"], 0);
    assert_eq!(stats["accepted"], 0);
    assert_eq!(stats["rejected"], 0);
    assert_eq!(stats["success_rate"], 0.0);
}

#[actix_rt::test]
async fn admin_stats_expose_sparse_daily_buckets() {
    let harness = TestHarness::new();
    let app = test::init_service(portal_app(&harness)).await;

    let owner = register_login(&app, "o@x.com", "password").await;
    for title in ["First Idea Title", "Second Idea Title", "Third Idea Title"] {
        let res = submit_idea(&app, &owner, title, "Description for the idea.", "AI").await;
        assert_eq!(res.status().as_u16(), 201);
    }
    register_login(&app, "admin@x.com", "password").await;
    make_admin(&harness, "admin@x.com").await;
    let admin = support::login(&app, "admin@x.com", "password").await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/admin/stats")
            .insert_header(auth(&admin))
            .to_request(),
    )
    .await;
    assert_eq!(res.status().as_u16(), 200);
    let stats: Value = test::read_body_json(res).await;
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["pending"], 3);
    assert_eq!(stats["acceptance_rate"], 0.0);
    // Everything was submitted just now, so exactly one bucket.
    let buckets = stats["daily_submissions"].as_array().expect("series");
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0]["count"], 3);

    // The per-user view agrees.
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/users/me/stats")
            .insert_header(auth(&owner))
            .to_request(),
    )
    .await;
    let mine: Value = test::read_body_json(res).await;
    assert_eq!(mine["pending"], 3);
    assert_eq!(mine["total"], 3);
}
