use axum::extract::State;
use axum::Json;
use survex_db::models::badge::Badge;
use survex_db::repositories::BadgeRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/badges -- the full catalog, easiest first. Public.
pub async fn list_badges(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Badge>>>> {
    let badges = BadgeRepo::list_catalog(&state.pool).await?;
    Ok(Json(DataResponse { data: badges }))
}
