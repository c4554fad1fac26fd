use axum::extract::State;
use axum::Json;
use survex_db::models::stats::PlatformStats;
use survex_db::repositories::StatsRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/stats -- platform-wide counters. Public.
pub async fn get_stats(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<PlatformStats>>> {
    let stats = StatsRepo::platform(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}
