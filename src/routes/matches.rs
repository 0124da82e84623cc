use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use axum_valid::Valid;
use uuid::Uuid;

use crate::{
    dto::matches::{
        CreateMatchRequest, MatchDetail, MatchListQuery, MatchSummary, RecordResultRequest,
    },
    error::AppError,
    services::match_service,
    state::SharedState,
};

/// Match scheduling and result endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/matches", get(list_matches).post(create_match))
        .route("/matches/{id}", get(get_match))
        .route("/matches/{id}/result", post(record_result))
        .route("/matches/{id}/cancel", post(cancel_match))
}

/// List matches, upcoming first.
#[utoipa::path(
    get,
    path = "/matches",
    tag = "matches",
    params(MatchListQuery),
    responses((status = 200, description = "Matches", body = [MatchSummary]))
)]
pub async fn list_matches(
    State(state): State<SharedState>,
    Query(query): Query<MatchListQuery>,
) -> Result<Json<Vec<MatchSummary>>, AppError> {
    Ok(Json(match_service::list_matches(&state, query).await?))
}

/// Schedule a new match.
#[utoipa::path(
    post,
    path = "/matches",
    tag = "matches",
    request_body = CreateMatchRequest,
    responses((status = 201, description = "Match scheduled", body = MatchSummary))
)]
pub async fn create_match(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<CreateMatchRequest>>,
) -> Result<(StatusCode, Json<MatchSummary>), AppError> {
    let summary = match_service::create_match(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// Retrieve a match with its teams and recorded figures.
#[utoipa::path(
    get,
    path = "/matches/{id}",
    tag = "matches",
    params(("id" = String, Path, description = "Identifier of the match")),
    responses((status = 200, description = "Match", body = MatchDetail))
)]
pub async fn get_match(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MatchDetail>, AppError> {
    Ok(Json(match_service::get_match(&state, id).await?))
}

/// Record the final score and player figures.
#[utoipa::path(
    post,
    path = "/matches/{id}/result",
    tag = "matches",
    params(("id" = String, Path, description = "Identifier of the match")),
    request_body = RecordResultRequest,
    responses(
        (status = 200, description = "Result stored", body = MatchDetail),
        (status = 409, description = "Match was cancelled")
    )
)]
pub async fn record_result(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<RecordResultRequest>>,
) -> Result<Json<MatchDetail>, AppError> {
    Ok(Json(match_service::record_result(&state, id, payload).await?))
}

/// Call off a pending match.
#[utoipa::path(
    post,
    path = "/matches/{id}/cancel",
    tag = "matches",
    params(("id" = String, Path, description = "Identifier of the match")),
    responses(
        (status = 200, description = "Match cancelled", body = MatchSummary),
        (status = 409, description = "Match is not pending")
    )
)]
pub async fn cancel_match(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MatchSummary>, AppError> {
    Ok(Json(match_service::cancel_match(&state, id).await?))
}
