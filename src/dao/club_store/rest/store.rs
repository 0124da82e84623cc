use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{
    Client, Method, StatusCode,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::dao::{
    club_store::ClubStore,
    models::{FineEntity, MatchEntity, MatchTeamEntity, PlayerEntity, PlayerStatsEntity},
    storage::{StorageError, StorageResult},
};

use super::{
    config::RestConfig,
    error::{RestDaoError, RestResult},
    models::{
        FINES_TABLE, FineRow, MATCHES_TABLE, MEMBERSHIPS_TABLE, MatchRow, MembershipRow,
        PLAYERS_TABLE, PlayerRow, STATS_TABLE, StatsRow, TEAMS_TABLE, TeamRow, team_entity,
        team_rows,
    },
};

const UPSERT_PREFERENCE: &str = "resolution=merge-duplicates,return=minimal";

/// [`ClubStore`] backed by a hosted PostgREST-style API.
#[derive(Clone)]
pub struct RestClubStore {
    client: Client,
    base_url: Arc<str>,
}

impl RestClubStore {
    /// Build the HTTP client and check that the API answers.
    pub async fn connect(config: RestConfig) -> RestResult<Self> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.api_key).map_err(|_| RestDaoError::InvalidApiKey)?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| RestDaoError::InvalidApiKey)?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|source| RestDaoError::ClientBuilder { source })?;

        let store = Self {
            client,
            base_url: Arc::from(config.base_url.trim_end_matches('/')),
        };

        store.ping().await?;
        Ok(store)
    }

    fn request(&self, method: Method, table: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.base_url, table);
        self.client.request(method, url)
    }

    async fn ping(&self) -> RestResult<()> {
        let response = self
            .request(Method::GET, PLAYERS_TABLE)
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await
            .map_err(|source| RestDaoError::RequestSend {
                table: PLAYERS_TABLE,
                source,
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(RestDaoError::RequestStatus {
                table: PLAYERS_TABLE,
                status: response.status(),
            })
        }
    }

    async fn select<T>(&self, table: &'static str, filters: &[(&str, String)]) -> RestResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::GET, table)
            .query(&[("select", "*")])
            .query(filters)
            .send()
            .await
            .map_err(|source| RestDaoError::RequestSend { table, source })?;

        if !response.status().is_success() {
            return Err(RestDaoError::RequestStatus {
                table,
                status: response.status(),
            });
        }

        response
            .json::<Vec<T>>()
            .await
            .map_err(|source| RestDaoError::DecodeResponse { table, source })
    }

    async fn select_by_id<T>(&self, table: &'static str, id: Uuid) -> RestResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let mut rows = self.select::<T>(table, &[("id", eq(id))]).await?;
        Ok(rows.pop())
    }

    async fn upsert<T>(&self, table: &'static str, rows: &[T]) -> RestResult<()>
    where
        T: Serialize,
    {
        if rows.is_empty() {
            return Ok(());
        }

        let response = self
            .request(Method::POST, table)
            .header("Prefer", UPSERT_PREFERENCE)
            .json(rows)
            .send()
            .await
            .map_err(|source| RestDaoError::RequestSend { table, source })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(RestDaoError::RequestStatus {
                table,
                status: response.status(),
            })
        }
    }

    /// Delete rows matching `column = value`, returning how many were removed.
    async fn delete_where(&self, table: &'static str, column: &str, value: Uuid) -> RestResult<usize> {
        let response = self
            .request(Method::DELETE, table)
            .query(&[(column, eq(value))])
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(|source| RestDaoError::RequestSend { table, source })?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(0),
            status if status.is_success() => {
                let deleted = response
                    .json::<Vec<serde_json::Value>>()
                    .await
                    .map_err(|source| RestDaoError::DecodeResponse { table, source })?;
                Ok(deleted.len())
            }
            other => Err(RestDaoError::RequestStatus {
                table,
                status: other,
            }),
        }
    }
}

fn eq(id: Uuid) -> String {
    format!("eq.{id}")
}

fn convert_all<R, E>(rows: Vec<R>) -> StorageResult<Vec<E>>
where
    R: TryInto<E, Error = StorageError>,
{
    rows.into_iter().map(TryInto::try_into).collect()
}

impl ClubStore for RestClubStore {
    fn list_players(&self) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let rows = store.select::<PlayerRow>(PLAYERS_TABLE, &[]).await?;
            convert_all(rows)
        })
    }

    fn find_player(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let row = store.select_by_id::<PlayerRow>(PLAYERS_TABLE, id).await?;
            row.map(TryInto::try_into).transpose()
        })
    }

    fn save_player(&self, player: PlayerEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let row = PlayerRow::from(player);
            store
                .upsert(PLAYERS_TABLE, &[row])
                .await
                .map_err(Into::into)
        })
    }

    fn delete_player(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move {
            let deleted = store.delete_where(PLAYERS_TABLE, "id", id).await?;
            Ok(deleted > 0)
        })
    }

    fn list_matches(&self) -> BoxFuture<'static, StorageResult<Vec<MatchEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let rows = store.select::<MatchRow>(MATCHES_TABLE, &[]).await?;
            convert_all(rows)
        })
    }

    fn find_match(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<MatchEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let row = store.select_by_id::<MatchRow>(MATCHES_TABLE, id).await?;
            row.map(TryInto::try_into).transpose()
        })
    }

    fn save_match(&self, game: MatchEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let row = MatchRow::from(game);
            store
                .upsert(MATCHES_TABLE, &[row])
                .await
                .map_err(Into::into)
        })
    }

    fn list_match_teams(
        &self,
        match_id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Vec<MatchTeamEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let teams = store
                .select::<TeamRow>(
                    TEAMS_TABLE,
                    &[
                        ("partido_id", eq(match_id)),
                        ("order", "created_at.asc,nombre.asc".to_string()),
                    ],
                )
                .await?;
            if teams.is_empty() {
                return Ok(Vec::new());
            }

            let ids = teams
                .iter()
                .map(|team| team.id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            let memberships = store
                .select::<MembershipRow>(
                    MEMBERSHIPS_TABLE,
                    &[
                        ("equipo_id", format!("in.({ids})")),
                        ("order", "created_at.asc".to_string()),
                    ],
                )
                .await?;

            Ok(teams
                .into_iter()
                .map(|team| team_entity(team, &memberships))
                .collect())
        })
    }

    fn save_match_team(&self, team: MatchTeamEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let team_id = team.id;
            let (row, memberships) = team_rows(team);
            store.upsert(TEAMS_TABLE, &[row]).await?;
            store
                .delete_where(MEMBERSHIPS_TABLE, "equipo_id", team_id)
                .await?;
            store
                .upsert(MEMBERSHIPS_TABLE, &memberships)
                .await
                .map_err(Into::into)
        })
    }

    fn list_player_stats(
        &self,
        match_id: Option<Uuid>,
    ) -> BoxFuture<'static, StorageResult<Vec<PlayerStatsEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let filters = match_id
                .map(|id| vec![("partido_id", eq(id))])
                .unwrap_or_default();
            let rows = store.select::<StatsRow>(STATS_TABLE, &filters).await?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
    }

    fn save_player_stats(
        &self,
        stats: Vec<PlayerStatsEntity>,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let rows = stats.into_iter().map(StatsRow::from).collect::<Vec<_>>();
            store.upsert(STATS_TABLE, &rows).await.map_err(Into::into)
        })
    }

    fn list_fines(&self) -> BoxFuture<'static, StorageResult<Vec<FineEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let rows = store.select::<FineRow>(FINES_TABLE, &[]).await?;
            convert_all(rows)
        })
    }

    fn find_fine(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<FineEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let row = store.select_by_id::<FineRow>(FINES_TABLE, id).await?;
            row.map(TryInto::try_into).transpose()
        })
    }

    fn save_fine(&self, fine: FineEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let row = FineRow::from(fine);
            store.upsert(FINES_TABLE, &[row]).await.map_err(Into::into)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ping().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        // The HTTP client pools connections itself; reconnecting amounts to a successful ping.
        let store = self.clone();
        Box::pin(async move { store.ping().await.map_err(Into::into) })
    }
}
