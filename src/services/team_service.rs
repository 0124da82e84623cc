use std::{
    collections::{HashMap, HashSet},
    time::{Duration, SystemTime},
};

use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    dao::models::{MatchEntity, MatchStatus, MatchTeamEntity, PlayerEntity},
    dto::{
        matches::MatchDetail,
        player::PlayerBrief,
        team::{GenerateTeamsRequest, GeneratedTeamsResponse, SaveTeamsRequest, TeamPreview},
    },
    error::ServiceError,
    services::{
        match_service,
        team_balancer::{self, Rated},
    },
    state::SharedState,
};

impl Rated for PlayerEntity {
    fn id(&self) -> Uuid {
        self.id
    }

    fn skill(&self) -> u8 {
        self.skill
    }
}

/// Balance the selected players into two teams without persisting anything.
pub async fn generate_teams(
    state: &SharedState,
    request: GenerateTeamsRequest,
) -> Result<GeneratedTeamsResponse, ServiceError> {
    let pool = resolve_players(state, &request.player_ids).await?;
    let teams = team_balancer::balance(&pool, state.config().min_players)?;

    let [name_a, name_b] = state.config().team_names.clone();
    let team_a = preview(name_a, &teams.team_a);
    let team_b = preview(name_b, &teams.team_b);
    let skill_gap = (team_a.mean_skill - team_b.mean_skill).abs();

    debug!(
        players = pool.len(),
        mean_a = team_a.mean_skill,
        mean_b = team_b.mean_skill,
        "generated balanced teams"
    );

    Ok(GeneratedTeamsResponse {
        team_a,
        team_b,
        skill_gap,
    })
}

/// Persist two confirmed teams as a new pending match.
pub async fn save_teams(
    state: &SharedState,
    request: SaveTeamsRequest,
) -> Result<MatchDetail, ServiceError> {
    let SaveTeamsRequest {
        team_a,
        team_b,
        date,
        kickoff,
        venue,
    } = request;

    if team_a.is_empty() || team_b.is_empty() {
        return Err(ServiceError::InvalidInput(
            "both teams need at least one player".into(),
        ));
    }
    let side_a = team_a.iter().copied().collect::<HashSet<_>>();
    if let Some(shared) = team_b.iter().find(|id| side_a.contains(id)) {
        return Err(ServiceError::InvalidInput(format!(
            "player `{shared}` cannot play for both teams"
        )));
    }

    let all_ids = team_a.iter().chain(team_b.iter()).copied().collect::<Vec<_>>();
    resolve_players(state, &all_ids).await?;

    let store = state.require_club_store().await?;
    let config = state.config();
    let venue = venue
        .map(|venue| venue.trim().to_string())
        .filter(|venue| !venue.is_empty())
        .unwrap_or_else(|| config.default_venue.clone());

    let created_at = SystemTime::now();
    let game = MatchEntity {
        id: Uuid::new_v4(),
        date: date.unwrap_or_else(match_service::today),
        kickoff: kickoff.unwrap_or(config.default_kickoff),
        venue,
        score_a: None,
        score_b: None,
        status: MatchStatus::Pending,
        created_at,
    };
    store.save_match(game.clone()).await?;

    let [name_a, name_b] = config.team_names.clone();
    let sides = [(name_a, team_a, created_at), (name_b, team_b, created_at + Duration::from_micros(1))];
    for (name, player_ids, created_at) in sides {
        store
            .save_match_team(MatchTeamEntity {
                id: Uuid::new_v4(),
                match_id: game.id,
                name,
                player_ids,
                created_at,
            })
            .await?;
    }

    info!(match_id = %game.id, players = all_ids.len(), "saved generated teams");
    match_service::match_detail(state, game).await
}

/// Fetch the requested players, preserving the caller's order.
async fn resolve_players(
    state: &SharedState,
    ids: &[Uuid],
) -> Result<Vec<PlayerEntity>, ServiceError> {
    let store = state.require_club_store().await?;
    let roster = store
        .list_players()
        .await?
        .into_iter()
        .map(|player| (player.id, player))
        .collect::<HashMap<_, _>>();

    let missing = ids
        .iter()
        .filter(|id| !roster.contains_key(id))
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        return Err(ServiceError::NotFound(format!(
            "unknown players: {}",
            missing.join(", ")
        )));
    }

    Ok(ids
        .iter()
        .filter_map(|id| roster.get(id).cloned())
        .collect())
}

fn preview(name: String, players: &[PlayerEntity]) -> TeamPreview {
    TeamPreview {
        name,
        mean_skill: team_balancer::mean_skill(players),
        players: players.iter().map(PlayerBrief::from).collect(),
    }
}
