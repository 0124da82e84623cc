//! Row shapes of the hosted tables and their conversions to domain entities.

use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, Time};
use uuid::Uuid;

use crate::dao::{
    models::{
        FineEntity, MatchEntity, MatchStatus, MatchTeamEntity, PlayerEntity, PlayerStatsEntity,
        Role, kickoff_time, match_date,
    },
    storage::StorageError,
};

pub const PLAYERS_TABLE: &str = "usuarios";
pub const MATCHES_TABLE: &str = "partidos";
pub const TEAMS_TABLE: &str = "equipos";
pub const MEMBERSHIPS_TABLE: &str = "jugadores_equipos";
pub const STATS_TABLE: &str = "estadisticas_jugadores";
pub const FINES_TABLE: &str = "multas";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRow {
    pub id: Uuid,
    pub nombre: String,
    pub email: String,
    #[serde(default)]
    pub imagen: Option<String>,
    #[serde(default)]
    pub posicion: Option<String>,
    pub habilidad: i32,
    #[serde(default)]
    pub rol: Role,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl From<PlayerEntity> for PlayerRow {
    fn from(player: PlayerEntity) -> Self {
        Self {
            id: player.id,
            nombre: player.name,
            email: player.email,
            imagen: player.image,
            posicion: player.position,
            habilidad: i32::from(player.skill),
            rol: player.role,
            created_at: Some(player.created_at.into()),
        }
    }
}

impl TryFrom<PlayerRow> for PlayerEntity {
    type Error = StorageError;

    fn try_from(row: PlayerRow) -> Result<Self, Self::Error> {
        let skill = u8::try_from(row.habilidad)
            .ok()
            .filter(|skill| (1..=100).contains(skill))
            .ok_or_else(|| {
                StorageError::corrupt(
                    PLAYERS_TABLE,
                    format!("player `{}` has skill {} outside 1..=100", row.id, row.habilidad),
                )
            })?;

        Ok(Self {
            id: row.id,
            name: row.nombre,
            email: row.email,
            skill,
            position: row.posicion,
            image: row.imagen,
            role: row.rol,
            created_at: timestamp(row.created_at),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRow {
    pub id: Uuid,
    #[serde(with = "match_date")]
    pub fecha: Date,
    #[serde(with = "kickoff_time")]
    pub hora: Time,
    pub campo: String,
    #[serde(default)]
    pub resultado_equipo_a: Option<i32>,
    #[serde(default)]
    pub resultado_equipo_b: Option<i32>,
    #[serde(default)]
    pub estado: MatchStatus,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl From<MatchEntity> for MatchRow {
    fn from(game: MatchEntity) -> Self {
        Self {
            id: game.id,
            fecha: game.date,
            hora: game.kickoff,
            campo: game.venue,
            resultado_equipo_a: game.score_a.map(saturating_i32),
            resultado_equipo_b: game.score_b.map(saturating_i32),
            estado: game.status,
            created_at: Some(game.created_at.into()),
        }
    }
}

impl TryFrom<MatchRow> for MatchEntity {
    type Error = StorageError;

    fn try_from(row: MatchRow) -> Result<Self, Self::Error> {
        let score = |value: Option<i32>| {
            value
                .map(|goals| {
                    u32::try_from(goals).map_err(|_| {
                        StorageError::corrupt(
                            MATCHES_TABLE,
                            format!("match `{}` has negative score {goals}", row.id),
                        )
                    })
                })
                .transpose()
        };

        Ok(Self {
            id: row.id,
            date: row.fecha,
            kickoff: row.hora,
            score_a: score(row.resultado_equipo_a)?,
            score_b: score(row.resultado_equipo_b)?,
            venue: row.campo,
            status: row.estado,
            created_at: timestamp(row.created_at),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRow {
    pub id: Uuid,
    pub partido_id: Uuid,
    pub nombre: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipRow {
    pub id: Uuid,
    pub equipo_id: Uuid,
    pub usuario_id: Uuid,
    /// One microsecond apart per member, so ordering by it restores assignment order.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

/// Split a team entity into its team row and one membership row per player.
pub fn team_rows(team: MatchTeamEntity) -> (TeamRow, Vec<MembershipRow>) {
    let memberships = team
        .player_ids
        .iter()
        .zip(0u64..)
        .map(|(player_id, position)| MembershipRow {
            id: Uuid::new_v4(),
            equipo_id: team.id,
            usuario_id: *player_id,
            created_at: Some((team.created_at + Duration::from_micros(position)).into()),
        })
        .collect();

    let row = TeamRow {
        id: team.id,
        partido_id: team.match_id,
        nombre: team.name,
        created_at: Some(team.created_at.into()),
    };

    (row, memberships)
}

/// Reassemble a team entity from its row and the memberships pointing at it.
pub fn team_entity(row: TeamRow, memberships: &[MembershipRow]) -> MatchTeamEntity {
    let mut members = memberships
        .iter()
        .filter(|membership| membership.equipo_id == row.id)
        .collect::<Vec<_>>();
    members.sort_by_key(|membership| membership.created_at);

    MatchTeamEntity {
        id: row.id,
        match_id: row.partido_id,
        player_ids: members
            .into_iter()
            .map(|membership| membership.usuario_id)
            .collect(),
        name: row.nombre,
        created_at: timestamp(row.created_at),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsRow {
    pub id: Uuid,
    pub usuario_id: Uuid,
    pub partido_id: Uuid,
    pub equipo_id: Uuid,
    #[serde(default)]
    pub goles: i32,
    #[serde(default)]
    pub asistencias: i32,
    #[serde(default)]
    pub tarjetas_amarillas: i32,
    #[serde(default)]
    pub tarjetas_rojas: i32,
}

impl From<PlayerStatsEntity> for StatsRow {
    fn from(stats: PlayerStatsEntity) -> Self {
        Self {
            id: stats.id,
            usuario_id: stats.player_id,
            partido_id: stats.match_id,
            equipo_id: stats.team_id,
            goles: saturating_i32(stats.goals),
            asistencias: saturating_i32(stats.assists),
            tarjetas_amarillas: saturating_i32(stats.yellow_cards),
            tarjetas_rojas: saturating_i32(stats.red_cards),
        }
    }
}

impl From<StatsRow> for PlayerStatsEntity {
    fn from(row: StatsRow) -> Self {
        // Negative counters are clamped rather than rejected.
        let count = |value: i32| u32::try_from(value).unwrap_or(0);
        Self {
            id: row.id,
            player_id: row.usuario_id,
            match_id: row.partido_id,
            team_id: row.equipo_id,
            goals: count(row.goles),
            assists: count(row.asistencias),
            yellow_cards: count(row.tarjetas_amarillas),
            red_cards: count(row.tarjetas_rojas),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FineRow {
    pub id: Uuid,
    pub usuario_id: Uuid,
    pub motivo: String,
    /// Amount in euros.
    pub monto: f64,
    #[serde(with = "match_date")]
    pub fecha: Date,
    #[serde(default)]
    pub pagado: bool,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl From<FineEntity> for FineRow {
    fn from(fine: FineEntity) -> Self {
        Self {
            id: fine.id,
            usuario_id: fine.player_id,
            motivo: fine.reason,
            monto: fine.amount_cents as f64 / 100.0,
            fecha: fine.date,
            pagado: fine.paid,
            created_at: Some(fine.created_at.into()),
        }
    }
}

/// Largest cent count an `f64` euro amount represents exactly (2^53).
const MAX_EXACT_CENTS: f64 = 9_007_199_254_740_992.0;

impl TryFrom<FineRow> for FineEntity {
    type Error = StorageError;

    fn try_from(row: FineRow) -> Result<Self, Self::Error> {
        let cents = (row.monto * 100.0).round();
        if !cents.is_finite() || !(0.0..=MAX_EXACT_CENTS).contains(&cents) {
            return Err(StorageError::corrupt(
                FINES_TABLE,
                format!("fine `{}` has invalid amount {}", row.id, row.monto),
            ));
        }

        Ok(Self {
            id: row.id,
            player_id: row.usuario_id,
            reason: row.motivo,
            amount_cents: cents as u64,
            date: row.fecha,
            paid: row.pagado,
            created_at: timestamp(row.created_at),
        })
    }
}

fn timestamp(value: Option<OffsetDateTime>) -> SystemTime {
    value.map(SystemTime::from).unwrap_or(SystemTime::UNIX_EPOCH)
}

fn saturating_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn player_row_decodes_hosted_payload() {
        let row: PlayerRow = serde_json::from_value(json!({
            "id": "7d9f2a4e-3c55-4a8e-9f0a-1b2c3d4e5f60",
            "nombre": "Carlos Martínez",
            "email": "carlos@example.com",
            "imagen": null,
            "posicion": "Delantero",
            "habilidad": 82,
            "rol": "administrador",
            "created_at": "2024-03-01T18:30:00.123456+00:00",
            "pena_id": null
        }))
        .unwrap();

        let entity = PlayerEntity::try_from(row).unwrap();
        assert_eq!(entity.skill, 82);
        assert_eq!(entity.role, Role::Admin);
        assert_eq!(entity.position.as_deref(), Some("Delantero"));
    }

    #[test]
    fn player_row_rejects_out_of_range_skill() {
        let row = PlayerRow {
            id: Uuid::new_v4(),
            nombre: "Raúl".into(),
            email: "raul@example.com".into(),
            imagen: None,
            posicion: None,
            habilidad: 140,
            rol: Role::Member,
            created_at: None,
        };

        assert!(matches!(
            PlayerEntity::try_from(row),
            Err(StorageError::Corrupt { table: PLAYERS_TABLE, .. })
        ));
    }

    #[test]
    fn match_row_accepts_times_with_seconds() {
        let row: MatchRow = serde_json::from_value(json!({
            "id": "0f1e2d3c-4b5a-4968-8776-a5b4c3d2e1f0",
            "fecha": "2024-05-18",
            "hora": "19:00:00",
            "campo": "Campo Municipal",
            "resultado_equipo_a": 3,
            "resultado_equipo_b": 1,
            "estado": "Jugado"
        }))
        .unwrap();

        let entity = MatchEntity::try_from(row).unwrap();
        assert_eq!(entity.kickoff, time::macros::time!(19:00));
        assert_eq!(entity.status, MatchStatus::Played);
        assert_eq!((entity.score_a, entity.score_b), (Some(3), Some(1)));
    }

    #[test]
    fn fine_amounts_round_trip_through_euros() {
        let fine = FineEntity {
            id: Uuid::new_v4(),
            player_id: Uuid::new_v4(),
            reason: "Llegar tarde".into(),
            amount_cents: 250,
            date: time::macros::date!(2024 - 05 - 18),
            paid: false,
            created_at: SystemTime::UNIX_EPOCH,
        };

        let row = FineRow::from(fine.clone());
        assert_eq!(row.monto, 2.5);
        assert_eq!(FineEntity::try_from(row).unwrap(), fine);
    }

    #[test]
    fn fine_rows_reject_unrepresentable_amounts() {
        let row = |monto: f64| FineRow {
            id: Uuid::new_v4(),
            usuario_id: Uuid::new_v4(),
            motivo: "Ausencia".into(),
            monto,
            fecha: time::macros::date!(2024 - 05 - 18),
            pagado: true,
            created_at: None,
        };

        for monto in [-1.0, f64::NAN, f64::INFINITY, 1e300, 1e17] {
            assert!(matches!(
                FineEntity::try_from(row(monto)),
                Err(StorageError::Corrupt { table: FINES_TABLE, .. })
            ));
        }
        assert_eq!(FineEntity::try_from(row(12.34)).unwrap().amount_cents, 1_234);
    }

    #[test]
    fn team_rows_link_every_member() {
        let team = MatchTeamEntity {
            id: Uuid::new_v4(),
            match_id: Uuid::new_v4(),
            name: "Equipo A".into(),
            player_ids: vec![Uuid::new_v4(), Uuid::new_v4()],
            created_at: SystemTime::UNIX_EPOCH,
        };

        let (row, memberships) = team_rows(team.clone());
        assert!(memberships.iter().all(|m| m.equipo_id == team.id));
        assert_eq!(team_entity(row, &memberships), team);
    }

    #[test]
    fn members_come_back_in_assignment_order() {
        let team = MatchTeamEntity {
            id: Uuid::new_v4(),
            match_id: Uuid::new_v4(),
            name: "Equipo B".into(),
            player_ids: (0..5).map(|_| Uuid::new_v4()).collect(),
            created_at: SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000),
        };

        let (row, mut memberships) = team_rows(team.clone());
        assert!(memberships.windows(2).all(|pair| pair[0].created_at < pair[1].created_at));

        memberships.reverse();
        memberships.swap(1, 3);
        assert_eq!(team_entity(row, &memberships).player_ids, team.player_ids);
    }
}
