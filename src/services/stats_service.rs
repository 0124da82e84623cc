use std::{
    cmp::{Ordering, Reverse},
    collections::{HashMap, HashSet},
};

use indexmap::IndexMap;
use uuid::Uuid;

use crate::{
    dao::models::{MatchEntity, MatchStatus, PlayerStatsEntity},
    dto::stats::{DashboardResponse, LeaderboardEntry, PlayerTotal},
    error::ServiceError,
    services::fine_service,
    state::SharedState,
};

/// Season totals per player, best scorers first.
pub async fn leaderboard(state: &SharedState) -> Result<Vec<LeaderboardEntry>, ServiceError> {
    let store = state.require_club_store().await?;
    let stats = store.list_player_stats(None).await?;
    let names = fine_service::player_names(state).await?;
    Ok(rank(&stats, &names))
}

/// Headline figures for the peña dashboard.
pub async fn dashboard(state: &SharedState) -> Result<DashboardResponse, ServiceError> {
    let store = state.require_club_store().await?;
    let players = store.list_players().await?;
    let matches = store.list_matches().await?;
    let stats = store.list_player_stats(None).await?;
    let fines = store.list_fines().await?;

    let names = players
        .into_iter()
        .map(|player| (player.id, player.name))
        .collect::<HashMap<_, _>>();
    let board = rank(&stats, &names);
    let record = MatchRecord::from_matches(&matches);
    let fines = fine_service::summarize(&fines, &names);

    Ok(DashboardResponse {
        members: names.len(),
        pending_matches: record.pending,
        played_matches: record.played,
        wins: record.wins,
        draws: record.draws,
        losses: record.losses,
        goals_for: record.goals_for,
        goals_against: record.goals_against,
        fines_fund_cents: fines.collected_cents,
        top_scorer: leader(&board, |entry| entry.goals),
        top_assister: leader(&board, |entry| entry.assists),
        most_fined: fines.most_fined,
    })
}

/// Aggregate stats rows per player, keeping first-appearance order for ties.
fn rank(stats: &[PlayerStatsEntity], names: &HashMap<Uuid, String>) -> Vec<LeaderboardEntry> {
    let mut totals = IndexMap::<Uuid, (LeaderboardEntry, HashSet<Uuid>)>::new();
    for row in stats {
        let (entry, matches) = totals.entry(row.player_id).or_insert_with(|| {
            (
                LeaderboardEntry {
                    player_id: row.player_id,
                    name: names.get(&row.player_id).cloned(),
                    matches: 0,
                    goals: 0,
                    assists: 0,
                    yellow_cards: 0,
                    red_cards: 0,
                },
                HashSet::new(),
            )
        });
        if matches.insert(row.match_id) {
            entry.matches += 1;
        }
        entry.goals += row.goals;
        entry.assists += row.assists;
        entry.yellow_cards += row.yellow_cards;
        entry.red_cards += row.red_cards;
    }

    let mut board = totals
        .into_values()
        .map(|(entry, _)| entry)
        .collect::<Vec<_>>();
    // Stable sort keeps first-appearance order among equal totals.
    board.sort_by_key(|entry| (Reverse(entry.goals), Reverse(entry.assists)));
    board
}

/// Entry with the highest non-zero `metric`; ties keep the earlier entry.
fn leader(
    board: &[LeaderboardEntry],
    metric: impl Fn(&LeaderboardEntry) -> u32,
) -> Option<PlayerTotal> {
    board
        .iter()
        .filter(|entry| metric(entry) > 0)
        .fold(None::<&LeaderboardEntry>, |best, entry| match best {
            Some(top) if metric(entry).cmp(&metric(top)) != Ordering::Greater => Some(top),
            _ => Some(entry),
        })
        .map(|entry| PlayerTotal {
            player_id: entry.player_id,
            name: entry.name.clone(),
            value: metric(entry),
        })
}

/// Results of played matches seen from the first team.
#[derive(Debug, Default, PartialEq, Eq)]
struct MatchRecord {
    pending: usize,
    played: usize,
    wins: usize,
    draws: usize,
    losses: usize,
    goals_for: u32,
    goals_against: u32,
}

impl MatchRecord {
    fn from_matches(matches: &[MatchEntity]) -> Self {
        let mut record = Self::default();
        for game in matches {
            match game.status {
                MatchStatus::Pending => record.pending += 1,
                MatchStatus::Cancelled => {}
                MatchStatus::Played => {
                    record.played += 1;
                    let (scored, conceded) =
                        (game.score_a.unwrap_or(0), game.score_b.unwrap_or(0));
                    record.goals_for += scored;
                    record.goals_against += conceded;
                    match scored.cmp(&conceded) {
                        Ordering::Greater => record.wins += 1,
                        Ordering::Equal => record.draws += 1,
                        Ordering::Less => record.losses += 1,
                    }
                }
            }
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::SystemTime};

    use time::macros::{date, time};

    use super::*;
    use crate::{
        config::AppConfig,
        dao::{
            club_store::{ClubStore, memory::MemoryClubStore},
            models::{FineEntity, PlayerEntity, Role},
        },
        dto::fine::PlayerAmount,
        state::AppState,
    };

    fn member(name: &str) -> PlayerEntity {
        PlayerEntity {
            id: Uuid::new_v4(),
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            skill: 60,
            position: None,
            image: None,
            role: Role::Member,
            created_at: SystemTime::now(),
        }
    }

    fn fine(player_id: Uuid, amount_cents: u64, paid: bool) -> FineEntity {
        FineEntity {
            id: Uuid::new_v4(),
            player_id,
            reason: "Llegar tarde".into(),
            amount_cents,
            date: date!(2024 - 05 - 18),
            paid,
            created_at: SystemTime::now(),
        }
    }

    fn stats(player_id: Uuid, match_id: Uuid, goals: u32, assists: u32) -> PlayerStatsEntity {
        PlayerStatsEntity {
            id: Uuid::new_v4(),
            player_id,
            match_id,
            team_id: Uuid::new_v4(),
            goals,
            assists,
            yellow_cards: 0,
            red_cards: 0,
        }
    }

    fn played(score_a: u32, score_b: u32) -> MatchEntity {
        MatchEntity {
            id: Uuid::new_v4(),
            date: date!(2024 - 05 - 18),
            kickoff: time!(19:00),
            venue: "Campo Municipal".into(),
            score_a: Some(score_a),
            score_b: Some(score_b),
            status: MatchStatus::Played,
            created_at: SystemTime::now(),
        }
    }

    #[test]
    fn leaderboard_sums_per_player_and_counts_distinct_matches() {
        let (carlos, raul) = (Uuid::new_v4(), Uuid::new_v4());
        let (m1, m2) = (Uuid::new_v4(), Uuid::new_v4());
        let names = HashMap::from([(carlos, "Carlos".to_string()), (raul, "Raúl".to_string())]);
        let rows = [
            stats(raul, m1, 1, 2),
            stats(carlos, m1, 2, 0),
            stats(carlos, m2, 1, 1),
        ];

        let board = rank(&rows, &names);
        assert_eq!(board[0].player_id, carlos);
        assert_eq!((board[0].goals, board[0].assists, board[0].matches), (3, 1, 2));
        assert_eq!(board[1].name.as_deref(), Some("Raúl"));
        assert_eq!(board[1].matches, 1);
    }

    #[test]
    fn leaders_skip_zero_totals_and_keep_first_on_ties() {
        let (first, second) = (Uuid::new_v4(), Uuid::new_v4());
        let m = Uuid::new_v4();
        let board = rank(&[stats(first, m, 2, 0), stats(second, m, 2, 0)], &HashMap::new());

        assert_eq!(
            leader(&board, |e| e.goals).map(|t| (t.player_id, t.value)),
            Some((first, 2))
        );
        assert!(leader(&board, |e| e.assists).is_none());
    }

    #[test]
    fn record_counts_results_from_first_team_view() {
        let mut cancelled = played(0, 0);
        cancelled.status = MatchStatus::Cancelled;
        let mut pending = played(0, 0);
        pending.status = MatchStatus::Pending;
        pending.score_a = None;
        pending.score_b = None;

        let record = MatchRecord::from_matches(&[
            played(3, 1),
            played(0, 2),
            played(2, 2),
            played(3, 0),
            cancelled,
            pending,
        ]);

        assert_eq!(
            record,
            MatchRecord {
                pending: 1,
                played: 4,
                wins: 2,
                draws: 1,
                losses: 1,
                goals_for: 8,
                goals_against: 5,
            }
        );
    }

    #[tokio::test]
    async fn dashboard_combines_roster_results_and_fines() {
        let store = MemoryClubStore::new();
        let (ane, jon, miren) = (member("Ane"), member("Jon"), member("Miren"));
        for player in [&ane, &jon, &miren] {
            store.save_player(player.clone()).await.unwrap();
        }

        let game = played(3, 1);
        let mut upcoming = played(0, 0);
        upcoming.status = MatchStatus::Pending;
        upcoming.score_a = None;
        upcoming.score_b = None;
        store.save_match(game.clone()).await.unwrap();
        store.save_match(upcoming).await.unwrap();
        store
            .save_player_stats(vec![stats(ane.id, game.id, 2, 0), stats(jon.id, game.id, 1, 1)])
            .await
            .unwrap();
        store.save_fine(fine(jon.id, 500, true)).await.unwrap();
        store.save_fine(fine(miren.id, 300, false)).await.unwrap();

        let state = AppState::with_store(AppConfig::default(), Arc::new(store));
        let dashboard = dashboard(&state).await.unwrap();

        assert_eq!(dashboard.members, 3);
        assert_eq!(dashboard.pending_matches, 1);
        assert_eq!(dashboard.played_matches, 1);
        assert_eq!((dashboard.wins, dashboard.draws, dashboard.losses), (1, 0, 0));
        assert_eq!((dashboard.goals_for, dashboard.goals_against), (3, 1));
        assert_eq!(dashboard.fines_fund_cents, 500);
        assert_eq!(
            dashboard.top_scorer,
            Some(PlayerTotal {
                player_id: ane.id,
                name: Some("Ane".into()),
                value: 2,
            })
        );
        assert_eq!(
            dashboard.top_assister,
            Some(PlayerTotal {
                player_id: jon.id,
                name: Some("Jon".into()),
                value: 1,
            })
        );
        assert_eq!(
            dashboard.most_fined,
            Some(PlayerAmount {
                player_id: jon.id,
                name: Some("Jon".into()),
                amount_cents: 500,
            })
        );
    }

    #[tokio::test]
    async fn empty_dashboard_has_no_leaders() {
        let state = AppState::with_store(AppConfig::default(), Arc::new(MemoryClubStore::new()));
        let dashboard = dashboard(&state).await.unwrap();

        assert_eq!(dashboard.members, 0);
        assert_eq!(dashboard.pending_matches + dashboard.played_matches, 0);
        assert_eq!((dashboard.wins, dashboard.draws, dashboard.losses), (0, 0, 0));
        assert_eq!((dashboard.goals_for, dashboard.goals_against), (0, 0));
        assert_eq!(dashboard.fines_fund_cents, 0);
        assert!(dashboard.top_scorer.is_none());
        assert!(dashboard.top_assister.is_none());
        assert!(dashboard.most_fined.is_none());

        let serialized = serde_json::to_value(&dashboard).unwrap();
        assert!(serialized.get("top_scorer").is_none());
        assert!(serialized.get("most_fined").is_none());
    }
}
