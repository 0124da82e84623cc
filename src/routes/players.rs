use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use axum_valid::Valid;
use uuid::Uuid;

use crate::{
    dto::player::{CreatePlayerRequest, PlayerResponse, UpdatePlayerRequest},
    error::AppError,
    services::player_service,
    state::SharedState,
};

/// Member roster endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/players", get(list_players).post(create_player))
        .route(
            "/players/{id}",
            get(get_player).put(update_player).delete(delete_player),
        )
}

/// List every member of the peña ordered by name.
#[utoipa::path(
    get,
    path = "/players",
    tag = "players",
    responses((status = 200, description = "Members", body = [PlayerResponse]))
)]
pub async fn list_players(
    State(state): State<SharedState>,
) -> Result<Json<Vec<PlayerResponse>>, AppError> {
    Ok(Json(player_service::list_players(&state).await?))
}

/// Register a new member.
#[utoipa::path(
    post,
    path = "/players",
    tag = "players",
    request_body = CreatePlayerRequest,
    responses(
        (status = 201, description = "Member created", body = PlayerResponse),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_player(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<CreatePlayerRequest>>,
) -> Result<(StatusCode, Json<PlayerResponse>), AppError> {
    let player = player_service::create_player(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

/// Retrieve a member by identifier.
#[utoipa::path(
    get,
    path = "/players/{id}",
    tag = "players",
    params(("id" = String, Path, description = "Identifier of the member")),
    responses(
        (status = 200, description = "Member", body = PlayerResponse),
        (status = 404, description = "Unknown member")
    )
)]
pub async fn get_player(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PlayerResponse>, AppError> {
    Ok(Json(player_service::get_player(&state, id).await?))
}

/// Update the supplied fields of a member.
#[utoipa::path(
    put,
    path = "/players/{id}",
    tag = "players",
    params(("id" = String, Path, description = "Identifier of the member")),
    request_body = UpdatePlayerRequest,
    responses((status = 200, description = "Member updated", body = PlayerResponse))
)]
pub async fn update_player(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<UpdatePlayerRequest>>,
) -> Result<Json<PlayerResponse>, AppError> {
    Ok(Json(player_service::update_player(&state, id, payload).await?))
}

/// Remove a member from the roster.
#[utoipa::path(
    delete,
    path = "/players/{id}",
    tag = "players",
    params(("id" = String, Path, description = "Identifier of the member")),
    responses((status = 204, description = "Member deleted"))
)]
pub async fn delete_player(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    player_service::delete_player(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
