//! Integration tests for `LeaderboardRepo::top`.

use sqlx::PgPool;
use survex_core::leaderboard::LeaderboardScope;
use survex_core::types::UserId;
use survex_db::models::user::UpsertUser;
use survex_db::repositories::{LeaderboardRepo, UserRepo};

/// Create a user and force its counters.
async fn user_with(pool: &PgPool, name: &str, completed: i64, weekly: i64) -> UserId {
    let input = UpsertUser {
        id: UserId::new_v4(),
        email: format!("{name}@andrew.cmu.edu"),
        full_name: None,
    };
    let user = UserRepo::upsert(pool, &input).await.unwrap();
    sqlx::query(
        "UPDATE users SET surveys_completed = $2, weekly_surveys_completed = $3,
                          total_points = $2 * 10
         WHERE id = $1",
    )
    .bind(user.id)
    .bind(completed)
    .bind(weekly)
    .execute(pool)
    .await
    .unwrap();
    user.id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ranks_by_completions(pool: PgPool) {
    let ten = user_with(&pool, "ten", 10, 0).await;
    let three = user_with(&pool, "three", 3, 0).await;
    let seven = user_with(&pool, "seven", 7, 0).await;

    let board = LeaderboardRepo::top(&pool, LeaderboardScope::AllTime, 50)
        .await
        .unwrap();

    let summary: Vec<(i64, UserId, i64)> = board
        .iter()
        .map(|r| (r.rank, r.entry.user_id, r.entry.surveys_completed))
        .collect();
    assert_eq!(summary, vec![(1, ten, 10), (2, seven, 7), (3, three, 3)]);
    assert_eq!(board[0].entry.total_points, 100);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ties_break_on_signup_order(pool: PgPool) {
    let early = user_with(&pool, "early", 4, 0).await;
    let late = user_with(&pool, "late", 4, 0).await;

    let board = LeaderboardRepo::top(&pool, LeaderboardScope::AllTime, 50)
        .await
        .unwrap();
    let ids: Vec<UserId> = board.iter().map(|r| r.entry.user_id).collect();
    assert_eq!(ids, vec![early, late]);
    assert_eq!(board[1].rank, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_limit_and_badges_attached(pool: PgPool) {
    let top = user_with(&pool, "top", 5, 0).await;
    user_with(&pool, "mid", 2, 0).await;
    user_with(&pool, "low", 1, 0).await;

    sqlx::query(
        "INSERT INTO user_badges (user_id, badge_id)
         SELECT $1, id FROM badges WHERE name = 'First Steps'",
    )
    .bind(top)
    .execute(&pool)
    .await
    .unwrap();

    let board = LeaderboardRepo::top(&pool, LeaderboardScope::AllTime, 2)
        .await
        .unwrap();
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].entry.badges.len(), 1);
    assert_eq!(board[0].entry.badges[0].badge.name, "First Steps");
    assert!(board[1].entry.badges.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_weekly_scope_ignores_stale_counters(pool: PgPool) {
    let busy_now = user_with(&pool, "now", 2, 2).await;
    let busy_before = user_with(&pool, "before", 20, 9).await;
    sqlx::query("UPDATE users SET last_weekly_reset = NOW() - INTERVAL '14 days' WHERE id = $1")
        .bind(busy_before)
        .execute(&pool)
        .await
        .unwrap();

    let board = LeaderboardRepo::top(&pool, LeaderboardScope::Weekly, 50)
        .await
        .unwrap();

    assert_eq!(board[0].entry.user_id, busy_now);
    assert_eq!(board[0].entry.weekly_surveys_completed, 2);
    assert_eq!(board[1].entry.user_id, busy_before);
    assert_eq!(board[1].entry.weekly_surveys_completed, 0);
}
