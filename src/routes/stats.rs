use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::stats::{DashboardResponse, LeaderboardEntry},
    error::AppError,
    services::stats_service,
    state::SharedState,
};

/// Aggregated statistics endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/stats/leaderboard", get(leaderboard))
        .route("/stats/dashboard", get(dashboard))
}

/// Per-player season totals, top scorers first.
#[utoipa::path(
    get,
    path = "/stats/leaderboard",
    tag = "stats",
    responses((status = 200, description = "Leaderboard", body = [LeaderboardEntry]))
)]
pub async fn leaderboard(
    State(state): State<SharedState>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    Ok(Json(stats_service::leaderboard(&state).await?))
}

/// Headline figures of the peña.
#[utoipa::path(
    get,
    path = "/stats/dashboard",
    tag = "stats",
    responses((status = 200, description = "Dashboard", body = DashboardResponse))
)]
pub async fn dashboard(
    State(state): State<SharedState>,
) -> Result<Json<DashboardResponse>, AppError> {
    Ok(Json(stats_service::dashboard(&state).await?))
}
