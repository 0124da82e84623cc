use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use time::{Date, Time};
use uuid::Uuid;

time::serde::format_description!(pub match_date, Date, "[year]-[month]-[day]");

/// Kickoff times written as `HH:MM`; seconds are accepted on input and dropped on output.
pub mod kickoff_time {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _, ser::Error as _};
    use time::{Time, format_description::BorrowedFormatItem, macros::format_description};

    const OUTPUT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");
    const INPUT: &[BorrowedFormatItem<'static>] =
        format_description!("[hour]:[minute][optional [:[second]]]");

    pub fn serialize<S: Serializer>(kickoff: &Time, serializer: S) -> Result<S::Ok, S::Error> {
        let text = kickoff.format(OUTPUT).map_err(S::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Time, D::Error> {
        let text = String::deserialize(deserializer)?;
        Time::parse(&text, INPUT).map_err(D::Error::custom)
    }

    /// Same format for optional fields.
    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
        use time::Time;

        use super::INPUT;

        pub fn serialize<S: Serializer>(
            kickoff: &Option<Time>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match kickoff {
                Some(kickoff) => super::serialize(kickoff, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Time>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|text| Time::parse(&text, INPUT).map_err(D::Error::custom))
                .transpose()
        }
    }
}

/// Role held by a member inside the peña.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    /// Regular member.
    #[default]
    #[serde(rename = "miembro")]
    Member,
    /// Member allowed to manage the peña.
    #[serde(rename = "administrador")]
    Admin,
}

/// Member of the peña as stored by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerEntity {
    /// Stable identifier for the player.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Skill rating in `1..=100` used to balance teams.
    pub skill: u8,
    /// Preferred position label (e.g. "Portero").
    pub position: Option<String>,
    /// Avatar URL.
    pub image: Option<String>,
    /// Role inside the peña.
    pub role: Role,
    /// Creation timestamp.
    pub created_at: SystemTime,
}

/// Lifecycle status of a match.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MatchStatus {
    /// Scheduled, not played yet.
    #[default]
    #[serde(rename = "Pendiente")]
    Pending,
    /// Result recorded.
    #[serde(rename = "Jugado")]
    Played,
    /// Called off.
    #[serde(rename = "Cancelado")]
    Cancelled,
}

/// Scheduled or played match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEntity {
    /// Primary key of the match.
    pub id: Uuid,
    /// Day the match is played.
    pub date: Date,
    /// Kickoff time.
    pub kickoff: Time,
    /// Pitch or venue name.
    pub venue: String,
    /// Goals scored by the first team, once played.
    pub score_a: Option<u32>,
    /// Goals scored by the second team, once played.
    pub score_b: Option<u32>,
    /// Current status.
    pub status: MatchStatus,
    /// Creation timestamp.
    pub created_at: SystemTime,
}

/// One side of a match along with its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTeamEntity {
    /// Stable identifier for the team.
    pub id: Uuid,
    /// Match this team belongs to.
    pub match_id: Uuid,
    /// Display name (e.g. "Equipo A").
    pub name: String,
    /// Members in the order they were assigned.
    pub player_ids: Vec<Uuid>,
    /// Creation timestamp.
    pub created_at: SystemTime,
}

/// Per-match statistics for a single player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStatsEntity {
    /// Primary key of the stats row.
    pub id: Uuid,
    /// Player the figures belong to.
    pub player_id: Uuid,
    /// Match the figures were recorded in.
    pub match_id: Uuid,
    /// Team the player played for.
    pub team_id: Uuid,
    pub goals: u32,
    pub assists: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
}

/// Fine imposed on a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FineEntity {
    /// Primary key of the fine.
    pub id: Uuid,
    /// Fined player.
    pub player_id: Uuid,
    /// Why the fine was imposed.
    pub reason: String,
    /// Amount in cents.
    pub amount_cents: u64,
    /// Day the fine was imposed.
    pub date: Date,
    /// Whether the fine has been settled.
    pub paid: bool,
    /// Creation timestamp.
    pub created_at: SystemTime,
}
