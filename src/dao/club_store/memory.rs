//! In-process store used when no hosted backend is configured, and by tests.

use std::sync::Arc;

use dashmap::DashMap;
use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dao::{
    club_store::ClubStore,
    models::{FineEntity, MatchEntity, MatchTeamEntity, PlayerEntity, PlayerStatsEntity},
    storage::StorageResult,
};

/// Volatile [`ClubStore`] keeping every table in a concurrent map.
#[derive(Clone, Default)]
pub struct MemoryClubStore {
    inner: Arc<Tables>,
}

#[derive(Default)]
struct Tables {
    players: DashMap<Uuid, PlayerEntity>,
    matches: DashMap<Uuid, MatchEntity>,
    teams: DashMap<Uuid, MatchTeamEntity>,
    stats: DashMap<Uuid, PlayerStatsEntity>,
    fines: DashMap<Uuid, FineEntity>,
}

impl MemoryClubStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn values<V: Clone>(map: &DashMap<Uuid, V>) -> Vec<V> {
    map.iter().map(|entry| entry.value().clone()).collect()
}

impl ClubStore for MemoryClubStore {
    fn list_players(&self) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>> {
        let players = values(&self.inner.players);
        Box::pin(async move { Ok(players) })
    }

    fn find_player(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>> {
        let player = self.inner.players.get(&id).map(|entry| entry.clone());
        Box::pin(async move { Ok(player) })
    }

    fn save_player(&self, player: PlayerEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.inner.players.insert(player.id, player);
        Box::pin(async { Ok(()) })
    }

    fn delete_player(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let removed = self.inner.players.remove(&id).is_some();
        Box::pin(async move { Ok(removed) })
    }

    fn list_matches(&self) -> BoxFuture<'static, StorageResult<Vec<MatchEntity>>> {
        let matches = values(&self.inner.matches);
        Box::pin(async move { Ok(matches) })
    }

    fn find_match(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<MatchEntity>>> {
        let found = self.inner.matches.get(&id).map(|entry| entry.clone());
        Box::pin(async move { Ok(found) })
    }

    fn save_match(&self, game: MatchEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.inner.matches.insert(game.id, game);
        Box::pin(async { Ok(()) })
    }

    fn list_match_teams(
        &self,
        match_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<MatchTeamEntity>>> {
        let mut teams = self
            .inner
            .teams
            .iter()
            .filter(|entry| entry.match_id == match_id)
            .map(|entry| entry.value().clone())
            .collect::<Vec<_>>();
        teams.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.name.cmp(&b.name))
        });
        Box::pin(async move { Ok(teams) })
    }

    fn save_match_team(&self, team: MatchTeamEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.inner.teams.insert(team.id, team);
        Box::pin(async { Ok(()) })
    }

    fn list_player_stats(
        &self,
        match_id: Option<Uuid>,
    ) -> BoxFuture<'static, StorageResult<Vec<PlayerStatsEntity>>> {
        let stats = self
            .inner
            .stats
            .iter()
            .filter(|entry| match_id.is_none_or(|id| entry.match_id == id))
            .map(|entry| entry.value().clone())
            .collect::<Vec<_>>();
        Box::pin(async move { Ok(stats) })
    }

    fn save_player_stats(
        &self,
        stats: Vec<PlayerStatsEntity>,
    ) -> BoxFuture<'static, StorageResult<()>> {
        for row in stats {
            self.inner.stats.insert(row.id, row);
        }
        Box::pin(async { Ok(()) })
    }

    fn list_fines(&self) -> BoxFuture<'static, StorageResult<Vec<FineEntity>>> {
        let fines = values(&self.inner.fines);
        Box::pin(async move { Ok(fines) })
    }

    fn find_fine(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<FineEntity>>> {
        let fine = self.inner.fines.get(&id).map(|entry| entry.clone());
        Box::pin(async move { Ok(fine) })
    }

    fn save_fine(&self, fine: FineEntity) -> BoxFuture<'static, StorageResult<()>> {
        self.inner.fines.insert(fine.id, fine);
        Box::pin(async { Ok(()) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use time::macros::{date, time};

    use super::*;
    use crate::dao::models::MatchStatus;

    fn team(match_id: Uuid, name: &str, created_at: SystemTime) -> MatchTeamEntity {
        MatchTeamEntity {
            id: Uuid::new_v4(),
            match_id,
            name: name.into(),
            player_ids: vec![Uuid::new_v4()],
            created_at,
        }
    }

    #[tokio::test]
    async fn teams_are_scoped_to_their_match_and_ordered() {
        let store = MemoryClubStore::new();
        let match_id = Uuid::new_v4();
        let now = SystemTime::now();

        store
            .save_match_team(team(match_id, "Equipo B", now))
            .await
            .unwrap();
        store
            .save_match_team(team(match_id, "Equipo A", now))
            .await
            .unwrap();
        store
            .save_match_team(team(Uuid::new_v4(), "Otro", now - Duration::from_secs(5)))
            .await
            .unwrap();

        let teams = store.list_match_teams(match_id).await.unwrap();
        let names = teams.iter().map(|t| t.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["Equipo A", "Equipo B"]);
    }

    #[tokio::test]
    async fn save_match_replaces_previous_version() {
        let store = MemoryClubStore::new();
        let mut game = MatchEntity {
            id: Uuid::new_v4(),
            date: date!(2024 - 05 - 01),
            kickoff: time!(19:00),
            venue: "Campo Municipal".into(),
            score_a: None,
            score_b: None,
            status: MatchStatus::Pending,
            created_at: SystemTime::now(),
        };
        store.save_match(game.clone()).await.unwrap();

        game.status = MatchStatus::Cancelled;
        store.save_match(game.clone()).await.unwrap();

        assert_eq!(store.list_matches().await.unwrap(), vec![game]);
    }

    #[tokio::test]
    async fn delete_player_reports_missing_records() {
        let store = MemoryClubStore::new();
        assert!(!store.delete_player(Uuid::new_v4()).await.unwrap());
    }
}
