use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use axum_valid::Valid;
use uuid::Uuid;

use crate::{
    dto::fine::{CreateFineRequest, FineListQuery, FineResponse, FinesSummary},
    error::AppError,
    services::fine_service,
    state::SharedState,
};

/// Fines bookkeeping endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/fines", get(list_fines).post(create_fine))
        .route("/fines/summary", get(fines_summary))
        .route("/fines/{id}/paid", post(mark_paid))
        .route("/fines/{id}/unpaid", post(mark_unpaid))
}

/// List fines, newest first.
#[utoipa::path(
    get,
    path = "/fines",
    tag = "fines",
    params(FineListQuery),
    responses((status = 200, description = "Fines", body = [FineResponse]))
)]
pub async fn list_fines(
    State(state): State<SharedState>,
    Query(query): Query<FineListQuery>,
) -> Result<Json<Vec<FineResponse>>, AppError> {
    Ok(Json(fine_service::list_fines(&state, query).await?))
}

/// Fine a member.
#[utoipa::path(
    post,
    path = "/fines",
    tag = "fines",
    request_body = CreateFineRequest,
    responses((status = 201, description = "Fine created", body = FineResponse))
)]
pub async fn create_fine(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<CreateFineRequest>>,
) -> Result<(StatusCode, Json<FineResponse>), AppError> {
    let fine = fine_service::create_fine(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(fine)))
}

/// Totals, pending amount and most-fined member.
#[utoipa::path(
    get,
    path = "/fines/summary",
    tag = "fines",
    responses((status = 200, description = "Fines summary", body = FinesSummary))
)]
pub async fn fines_summary(
    State(state): State<SharedState>,
) -> Result<Json<FinesSummary>, AppError> {
    Ok(Json(fine_service::fines_summary(&state).await?))
}

/// Mark a fine as paid.
#[utoipa::path(
    post,
    path = "/fines/{id}/paid",
    tag = "fines",
    params(("id" = String, Path, description = "Identifier of the fine")),
    responses((status = 200, description = "Fine updated", body = FineResponse))
)]
pub async fn mark_paid(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FineResponse>, AppError> {
    Ok(Json(fine_service::set_paid(&state, id, true).await?))
}

/// Mark a fine as outstanding again.
#[utoipa::path(
    post,
    path = "/fines/{id}/unpaid",
    tag = "fines",
    params(("id" = String, Path, description = "Identifier of the fine")),
    responses((status = 200, description = "Fine updated", body = FineResponse))
)]
pub async fn mark_unpaid(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FineResponse>, AppError> {
    Ok(Json(fine_service::set_paid(&state, id, false).await?))
}
