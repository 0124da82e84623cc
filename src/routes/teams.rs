use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use axum_valid::Valid;

use crate::{
    dto::{
        matches::MatchDetail,
        team::{GenerateTeamsRequest, GeneratedTeamsResponse, SaveTeamsRequest},
    },
    error::AppError,
    services::team_service,
    state::SharedState,
};

/// Team balancing endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/teams/generate", post(generate_teams))
        .route("/teams/save", post(save_teams))
}

/// Split the selected players into two balanced teams (nothing is stored).
#[utoipa::path(
    post,
    path = "/teams/generate",
    tag = "teams",
    request_body = GenerateTeamsRequest,
    responses(
        (status = 200, description = "Balanced teams", body = GeneratedTeamsResponse),
        (status = 400, description = "Too few players selected"),
        (status = 404, description = "Unknown player in selection")
    )
)]
pub async fn generate_teams(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<GenerateTeamsRequest>>,
) -> Result<Json<GeneratedTeamsResponse>, AppError> {
    Ok(Json(team_service::generate_teams(&state, payload).await?))
}

/// Persist confirmed teams as a new pending match.
#[utoipa::path(
    post,
    path = "/teams/save",
    tag = "teams",
    request_body = SaveTeamsRequest,
    responses((status = 201, description = "Match created with both teams", body = MatchDetail))
)]
pub async fn save_teams(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<SaveTeamsRequest>>,
) -> Result<(StatusCode, Json<MatchDetail>), AppError> {
    let detail = team_service::save_teams(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}
