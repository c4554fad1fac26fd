//! `GET /health`, mounted at the root rather than under `/api/v1`.
//!
//! Reports whether the database answers, whether its schema is the one this
//! build expects, and how many surveys are open. Load balancers only look at
//! the status code: 503 when the database is unreachable, 200 otherwise.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use survex_db::repositories::SurveyRepo;
use survex_db::DbPool;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Ok,
    /// Reachable, but the applied schema differs from the embedded one.
    Degraded,
    Unavailable,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: &'static str,
    /// Absent when the database could not be queried.
    pub database: Option<DatabaseReport>,
}

#[derive(Debug, Serialize)]
pub struct DatabaseReport {
    pub schema_version: Option<i64>,
    pub expected_schema_version: Option<i64>,
    pub active_surveys: i64,
}

async fn inspect_database(pool: &DbPool) -> Result<DatabaseReport, sqlx::Error> {
    Ok(DatabaseReport {
        schema_version: survex_db::schema_version(pool).await?,
        expected_schema_version: survex_db::latest_migration(),
        active_surveys: SurveyRepo::count_active(pool).await?,
    })
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let (status, database) = match inspect_database(&state.pool).await {
        Ok(db) if db.schema_version == db.expected_schema_version => (HealthStatus::Ok, Some(db)),
        Ok(db) => {
            tracing::warn!(
                applied = ?db.schema_version,
                expected = ?db.expected_schema_version,
                "Database schema out of date"
            );
            (HealthStatus::Degraded, Some(db))
        }
        Err(err) => {
            tracing::warn!(error = %err, "Health check could not reach the database");
            (HealthStatus::Unavailable, None)
        }
    };

    let code = match status {
        HealthStatus::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        HealthStatus::Ok | HealthStatus::Degraded => StatusCode::OK,
    };
    let report = HealthReport {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database,
    };
    (code, Json(report))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
