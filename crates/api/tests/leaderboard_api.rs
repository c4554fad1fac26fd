//! HTTP-level integration tests for the public leaderboard, badges and stats.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_auth, post_survey, test_user};
use sqlx::PgPool;
use survex_db::models::user::UpsertUser;
use survex_db::repositories::UserRepo;
use uuid::Uuid;

async fn user_with_completions(pool: &PgPool, name: &str, completed: i64) -> Uuid {
    let input = UpsertUser {
        id: Uuid::new_v4(),
        email: format!("{name}@andrew.cmu.edu"),
        full_name: Some(name.to_string()),
    };
    let user = UserRepo::upsert(pool, &input).await.unwrap();
    sqlx::query("UPDATE users SET surveys_completed = $2 WHERE id = $1")
        .bind(user.id)
        .bind(completed)
        .execute(pool)
        .await
        .unwrap();
    user.id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn leaderboard_ranks_descending(pool: PgPool) {
    user_with_completions(&pool, "ten", 10).await;
    user_with_completions(&pool, "three", 3).await;
    user_with_completions(&pool, "seven", 7).await;

    let app = build_test_app(pool);
    let response = get(app, "/api/v1/leaderboard").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let rows: Vec<(i64, i64)> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| {
            (
                r["rank"].as_i64().unwrap(),
                r["surveys_completed"].as_i64().unwrap(),
            )
        })
        .collect();
    assert_eq!(rows, vec![(1, 10), (2, 7), (3, 3)]);
    assert!(json["data"][0]["badges"].is_array());
    assert_eq!(json["data"][0]["full_name"], "ten");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn leaderboard_limit_is_clamped(pool: PgPool) {
    for i in 0..3 {
        user_with_completions(&pool, &format!("u{i}"), i).await;
    }

    let app = build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/leaderboard?limit=2").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let app = build_test_app(pool);
    let json = body_json(get(app, "/api/v1/leaderboard?limit=0").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn weekly_scope_counts_this_weeks_completions(pool: PgPool) {
    let owner = test_user("owner");
    let active = test_user("active");
    let id = post_survey(&pool, &owner, "fresh", 0).await;
    user_with_completions(&pool, "veteran", 40).await;

    let app = build_test_app(pool.clone());
    post_auth(app, &format!("/api/v1/surveys/{id}/complete"), &active.token).await;

    let app = build_test_app(pool);
    let json = body_json(get(app, "/api/v1/leaderboard?scope=weekly").await).await;
    assert_eq!(json["data"][0]["user_id"], active.id.to_string());
    assert_eq!(json["data"][0]["weekly_surveys_completed"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_scope_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/leaderboard?scope=monthly").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn badge_catalog_is_public(pool: PgPool) {
    let app = build_test_app(pool);
    let json = body_json(get(app, "/api/v1/badges").await).await;
    let catalog = json["data"].as_array().unwrap();
    assert_eq!(catalog.len(), 7);
    assert_eq!(catalog[0]["requirement_value"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stats_count_users_active_surveys_and_completions(pool: PgPool) {
    let owner = test_user("owner");
    let taker = test_user("taker");
    let id = post_survey(&pool, &owner, "counted", 0).await;
    let app = build_test_app(pool.clone());
    post_auth(app, &format!("/api/v1/surveys/{id}/complete"), &taker.token).await;

    let app = build_test_app(pool);
    let json = body_json(get(app, "/api/v1/stats").await).await;
    assert_eq!(json["data"]["total_users"], 2);
    assert_eq!(json["data"]["total_surveys"], 1);
    assert_eq!(json["data"]["total_completions"], 1);
}
