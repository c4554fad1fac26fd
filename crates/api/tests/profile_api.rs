//! HTTP-level integration tests for `/auth/session` and `/me`.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get_auth, post_auth, post_json, post_survey, test_user};
use sqlx::PgPool;
use survex_api::auth::jwt::generate_token;

#[sqlx::test(migrations = "../../db/migrations")]
async fn session_upserts_user_from_claims(pool: PgPool) {
    let config = common::test_config();
    let id = uuid::Uuid::new_v4();
    let token = generate_token(id, "ada@andrew.cmu.edu", Some("Ada Lovelace"), 900, &config.jwt)
        .unwrap();

    let app = build_test_app(pool.clone());
    let response = post_auth(app, "/api/v1/auth/session", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], id.to_string());
    assert_eq!(json["data"]["full_name"], "Ada Lovelace");
    assert_eq!(json["data"]["surveys_completed"], 0);

    // A token without a name falls back to the email's local part.
    let token = generate_token(id, "ada@andrew.cmu.edu", None, 900, &config.jwt).unwrap();
    let app = build_test_app(pool);
    let json = body_json(post_auth(app, "/api/v1/auth/session", &token).await).await;
    assert_eq!(json["data"]["full_name"], "ada");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn session_requires_token(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(app, "/api/v1/auth/session", serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn profile_collects_surveys_completions_and_badges(pool: PgPool) {
    let owner = test_user("owner");
    let taker = test_user("taker");
    let theirs = post_survey(&pool, &owner, "theirs", 0).await;
    let mine = post_survey(&pool, &taker, "mine", 0).await;

    let app = build_test_app(pool.clone());
    let response = post_auth(
        app,
        &format!("/api/v1/surveys/{theirs}/complete"),
        &taker.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/me", &taker.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = &json["data"];

    assert_eq!(data["user"]["surveys_completed"], 1);
    assert_eq!(data["user"]["surveys_posted"], 1);
    assert_eq!(data["user"]["total_points"], 10);
    assert_eq!(data["weekly_surveys_completed"], 1);
    assert_eq!(data["eligibility"]["surveys_completed"], 1);
    assert_eq!(data["surveys"][0]["id"], mine);
    assert_eq!(data["completions"][0]["survey_id"], theirs);
    assert_eq!(data["completions"][0]["survey"]["title"], "theirs");

    let names: Vec<&str> = data["badges"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["badge"]["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"First Steps"));
    assert!(names.contains(&"Researcher"));

    let app = build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/v1/me/completed-survey-ids", &taker.token).await).await;
    assert_eq!(json["data"], serde_json::json!([theirs]));

    for uri in ["/api/v1/me/surveys", "/api/v1/me/completions", "/api/v1/me/badges"] {
        let app = build_test_app(pool.clone());
        let response = get_auth(app, uri, &taker.token).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        let json = body_json(response).await;
        assert!(!json["data"].as_array().unwrap().is_empty(), "{uri} should not be empty");
    }
}
