use axum::extract::{Query, State};
use axum::Json;
use survex_core::leaderboard::{clamp_leaderboard_limit, Ranked};
use survex_db::models::leaderboard::LeaderboardEntry;
use survex_db::repositories::LeaderboardRepo;

use crate::error::AppResult;
use crate::query::LeaderboardParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/leaderboard
///
/// Public. Users ranked by completions (`scope=all_time`, the default) or by
/// this week's completions (`scope=weekly`).
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> AppResult<Json<DataResponse<Vec<Ranked<LeaderboardEntry>>>>> {
    let limit = clamp_leaderboard_limit(params.limit);
    let board = LeaderboardRepo::top(&state.pool, params.scope, limit).await?;
    Ok(Json(DataResponse { data: board }))
}
