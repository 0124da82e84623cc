use std::{
    cmp::Reverse,
    collections::{HashMap, HashSet},
    time::SystemTime,
};

use time::{Date, OffsetDateTime};
use tracing::info;
use uuid::Uuid;

use crate::{
    dao::models::{MatchEntity, MatchStatus, PlayerStatsEntity},
    dto::matches::{
        CreateMatchRequest, MatchDetail, MatchListQuery, MatchSummary, MatchTeamView,
        RecordResultRequest, StatLine, TeamMemberView,
    },
    error::ServiceError,
    state::SharedState,
};

/// Current UTC calendar day.
pub(crate) fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// List matches, upcoming ones first in chronological order, then the rest newest first.
pub async fn list_matches(
    state: &SharedState,
    query: MatchListQuery,
) -> Result<Vec<MatchSummary>, ServiceError> {
    let store = state.require_club_store().await?;
    let status = query.status.map(MatchStatus::from);

    let mut matches = store
        .list_matches()
        .await?
        .into_iter()
        .filter(|game| status.is_none_or(|status| game.status == status))
        .collect::<Vec<_>>();
    sort_matches(&mut matches);

    Ok(matches.into_iter().map(Into::into).collect())
}

pub async fn get_match(state: &SharedState, id: Uuid) -> Result<MatchDetail, ServiceError> {
    let game = load_match(state, id).await?;
    match_detail(state, game).await
}

/// Schedule a new pending match.
pub async fn create_match(
    state: &SharedState,
    request: CreateMatchRequest,
) -> Result<MatchSummary, ServiceError> {
    let store = state.require_club_store().await?;

    let venue = request.venue.trim().to_string();
    if venue.is_empty() {
        return Err(ServiceError::InvalidInput("venue must not be empty".into()));
    }

    let game = MatchEntity {
        id: Uuid::new_v4(),
        date: request.date,
        kickoff: request.kickoff,
        venue,
        score_a: None,
        score_b: None,
        status: MatchStatus::Pending,
        created_at: SystemTime::now(),
    };
    store.save_match(game.clone()).await?;

    info!(match_id = %game.id, date = %game.date, "scheduled match");
    Ok(game.into())
}

/// Store the final score and upsert the per-player figures of a match.
pub async fn record_result(
    state: &SharedState,
    id: Uuid,
    request: RecordResultRequest,
) -> Result<MatchDetail, ServiceError> {
    let store = state.require_club_store().await?;
    let mut game = load_match(state, id).await?;

    if game.status == MatchStatus::Cancelled {
        return Err(ServiceError::InvalidState(format!(
            "match `{id}` was cancelled"
        )));
    }

    let teams = store.list_match_teams(id).await?;
    let memberships = teams
        .iter()
        .flat_map(|team| team.player_ids.iter().map(move |player| (team.id, *player)))
        .collect::<HashSet<_>>();

    let mut seen = HashSet::new();
    for line in &request.player_stats {
        if !memberships.contains(&(line.team_id, line.player_id)) {
            return Err(ServiceError::InvalidInput(format!(
                "player `{}` is not part of team `{}` in this match",
                line.player_id, line.team_id
            )));
        }
        if !seen.insert((line.team_id, line.player_id)) {
            return Err(ServiceError::InvalidInput(format!(
                "figures for player `{}` are listed more than once",
                line.player_id
            )));
        }
    }

    let existing = store
        .list_player_stats(Some(id))
        .await?
        .into_iter()
        .map(|row| ((row.team_id, row.player_id), row.id))
        .collect::<HashMap<_, _>>();

    let rows = request
        .player_stats
        .into_iter()
        .map(|line| PlayerStatsEntity {
            id: existing
                .get(&(line.team_id, line.player_id))
                .copied()
                .unwrap_or_else(Uuid::new_v4),
            player_id: line.player_id,
            match_id: id,
            team_id: line.team_id,
            goals: line.goals,
            assists: line.assists,
            yellow_cards: line.yellow_cards,
            red_cards: line.red_cards,
        })
        .collect::<Vec<_>>();

    game.score_a = Some(request.score_a);
    game.score_b = Some(request.score_b);
    game.status = MatchStatus::Played;
    store.save_match(game.clone()).await?;
    store.save_player_stats(rows).await?;

    info!(
        match_id = %id,
        score_a = request.score_a,
        score_b = request.score_b,
        "recorded match result"
    );
    match_detail(state, game).await
}

/// Call off a pending match.
pub async fn cancel_match(state: &SharedState, id: Uuid) -> Result<MatchSummary, ServiceError> {
    let store = state.require_club_store().await?;
    let mut game = load_match(state, id).await?;

    match game.status {
        MatchStatus::Pending => {}
        MatchStatus::Played => {
            return Err(ServiceError::InvalidState(format!(
                "match `{id}` has already been played"
            )));
        }
        MatchStatus::Cancelled => {
            return Err(ServiceError::InvalidState(format!(
                "match `{id}` is already cancelled"
            )));
        }
    }

    game.status = MatchStatus::Cancelled;
    store.save_match(game.clone()).await?;
    info!(match_id = %id, "cancelled match");
    Ok(game.into())
}

/// Assemble the full view of `game`: its teams, member names and recorded figures.
pub(crate) async fn match_detail(
    state: &SharedState,
    game: MatchEntity,
) -> Result<MatchDetail, ServiceError> {
    let store = state.require_club_store().await?;
    let teams = store.list_match_teams(game.id).await?;
    let stats = store.list_player_stats(Some(game.id)).await?;
    let names = store
        .list_players()
        .await?
        .into_iter()
        .map(|player| (player.id, player.name))
        .collect::<HashMap<_, _>>();
    let stats = stats
        .iter()
        .map(|row| ((row.team_id, row.player_id), StatLine::from(row)))
        .collect::<HashMap<_, _>>();

    let teams = teams
        .into_iter()
        .map(|team| MatchTeamView {
            players: team
                .player_ids
                .iter()
                .map(|player_id| TeamMemberView {
                    id: *player_id,
                    name: names.get(player_id).cloned(),
                    stats: stats.get(&(team.id, *player_id)).cloned(),
                })
                .collect(),
            id: team.id,
            name: team.name,
        })
        .collect();

    Ok(MatchDetail {
        summary: game.into(),
        teams,
    })
}

async fn load_match(state: &SharedState, id: Uuid) -> Result<MatchEntity, ServiceError> {
    let store = state.require_club_store().await?;
    store
        .find_match(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("match `{id}` not found")))
}

fn sort_matches(matches: &mut [MatchEntity]) {
    matches.sort_by_key(|game| {
        let upcoming = game.status == MatchStatus::Pending;
        let when = (game.date, game.kickoff);
        (
            !upcoming,
            if upcoming { Some(when) } else { None },
            if upcoming { None } else { Some(Reverse(when)) },
        )
    });
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use time::macros::{date, time};

    use super::*;
    use crate::{
        config::AppConfig,
        dao::club_store::{ClubStore, memory::MemoryClubStore},
        dao::models::MatchTeamEntity,
        dto::matches::{MatchStatusDto, PlayerStatsInput},
        state::AppState,
    };

    struct Fixture {
        state: SharedState,
        store: MemoryClubStore,
        match_id: Uuid,
        team_a: Uuid,
        player: Uuid,
    }

    async fn fixture() -> Fixture {
        let store = MemoryClubStore::new();
        let state = AppState::with_store(AppConfig::default(), Arc::new(store.clone()));
        let created = create_match(
            &state,
            CreateMatchRequest {
                date: date!(2024 - 05 - 18),
                kickoff: time!(19:00),
                venue: "Campo Municipal".into(),
            },
        )
        .await
        .unwrap();

        let team_a = Uuid::new_v4();
        let player = Uuid::new_v4();
        store
            .save_match_team(MatchTeamEntity {
                id: team_a,
                match_id: created.id,
                name: "Equipo A".into(),
                player_ids: vec![player],
                created_at: SystemTime::now(),
            })
            .await
            .unwrap();

        Fixture {
            state,
            store,
            match_id: created.id,
            team_a,
            player,
        }
    }

    fn result(f: &Fixture, goals: u32) -> RecordResultRequest {
        RecordResultRequest {
            score_a: 3,
            score_b: 1,
            player_stats: vec![PlayerStatsInput {
                player_id: f.player,
                team_id: f.team_a,
                goals,
                assists: 1,
                yellow_cards: 0,
                red_cards: 0,
            }],
        }
    }

    #[tokio::test]
    async fn recording_twice_updates_existing_figures() {
        let f = fixture().await;

        record_result(&f.state, f.match_id, result(&f, 1)).await.unwrap();
        let detail = record_result(&f.state, f.match_id, result(&f, 2))
            .await
            .unwrap();

        let rows = f.store.list_player_stats(Some(f.match_id)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].goals, 2);
        assert_eq!(detail.summary.status, MatchStatusDto::Played);
        assert_eq!(detail.summary.score_a, Some(3));
        assert_eq!(
            detail.teams[0].players[0].stats.as_ref().map(|s| s.goals),
            Some(2)
        );
    }

    #[tokio::test]
    async fn figures_for_outsiders_are_rejected() {
        let f = fixture().await;
        let mut request = result(&f, 1);
        request.player_stats[0].player_id = Uuid::new_v4();

        let err = record_result(&f.state, f.match_id, request)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn played_matches_cannot_be_cancelled() {
        let f = fixture().await;
        record_result(&f.state, f.match_id, result(&f, 0)).await.unwrap();

        let err = cancel_match(&f.state, f.match_id).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));
    }

    #[tokio::test]
    async fn cancelled_matches_do_not_accept_results() {
        let f = fixture().await;
        let cancelled = cancel_match(&f.state, f.match_id).await.unwrap();
        assert_eq!(cancelled.status, MatchStatusDto::Cancelled);

        let err = record_result(&f.state, f.match_id, result(&f, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));
    }

    #[tokio::test]
    async fn listing_puts_upcoming_first_then_latest_results() {
        let store = MemoryClubStore::new();
        let state = AppState::with_store(AppConfig::default(), Arc::new(store.clone()));
        let schedule = [
            (date!(2024 - 05 - 01), MatchStatus::Played),
            (date!(2024 - 06 - 10), MatchStatus::Pending),
            (date!(2024 - 05 - 08), MatchStatus::Played),
            (date!(2024 - 06 - 03), MatchStatus::Pending),
        ];
        for (date, status) in schedule {
            store
                .save_match(MatchEntity {
                    id: Uuid::new_v4(),
                    date,
                    kickoff: time!(19:00),
                    venue: "Campo Municipal".into(),
                    score_a: None,
                    score_b: None,
                    status,
                    created_at: SystemTime::now(),
                })
                .await
                .unwrap();
        }

        let dates = list_matches(&state, MatchListQuery::default())
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.date)
            .collect::<Vec<_>>();
        assert_eq!(
            dates,
            [
                date!(2024 - 06 - 03),
                date!(2024 - 06 - 10),
                date!(2024 - 05 - 08),
                date!(2024 - 05 - 01),
            ]
        );

        let pending = list_matches(
            &state,
            MatchListQuery {
                status: Some(MatchStatusDto::Pending),
            },
        )
        .await
        .unwrap();
        assert_eq!(pending.len(), 2);
    }

    #[tokio::test]
    async fn unknown_match_is_not_found() {
        let f = fixture().await;
        let err = get_match(&f.state, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
