pub mod memory;
#[cfg(feature = "rest-store")]
pub mod rest;

use crate::dao::models::{
    FineEntity, MatchEntity, MatchTeamEntity, PlayerEntity, PlayerStatsEntity,
};
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;
use uuid::Uuid;

/// Abstraction over the persistence layer holding the peña records.
///
/// `save_*` methods upsert by primary key.
pub trait ClubStore: Send + Sync {
    fn list_players(&self) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>>;
    fn find_player(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>>;
    fn save_player(&self, player: PlayerEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Remove a player, returning whether a record was deleted.
    fn delete_player(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>>;

    fn list_matches(&self) -> BoxFuture<'static, StorageResult<Vec<MatchEntity>>>;
    fn find_match(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<MatchEntity>>>;
    fn save_match(&self, game: MatchEntity) -> BoxFuture<'static, StorageResult<()>>;

    /// Teams of a match, in creation order.
    fn list_match_teams(
        &self,
        match_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<MatchTeamEntity>>>;
    /// Upsert a team and replace its memberships.
    fn save_match_team(&self, team: MatchTeamEntity) -> BoxFuture<'static, StorageResult<()>>;

    /// Stats rows, optionally restricted to one match.
    fn list_player_stats(
        &self,
        match_id: Option<Uuid>,
    ) -> BoxFuture<'static, StorageResult<Vec<PlayerStatsEntity>>>;
    fn save_player_stats(
        &self,
        stats: Vec<PlayerStatsEntity>,
    ) -> BoxFuture<'static, StorageResult<()>>;

    fn list_fines(&self) -> BoxFuture<'static, StorageResult<Vec<FineEntity>>>;
    fn find_fine(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<FineEntity>>>;
    fn save_fine(&self, fine: FineEntity) -> BoxFuture<'static, StorageResult<()>>;

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
