//! DTO definitions for match scheduling and results.

use serde::{Deserialize, Serialize};
use time::{Date, Time};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::dao::models::{
    MatchEntity, MatchStatus, PlayerStatsEntity, kickoff_time, match_date,
};
use crate::dto::validation::validate_not_blank;

/// Match status as exposed over the API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatusDto {
    Pending,
    Played,
    Cancelled,
}

impl From<MatchStatus> for MatchStatusDto {
    fn from(status: MatchStatus) -> Self {
        match status {
            MatchStatus::Pending => MatchStatusDto::Pending,
            MatchStatus::Played => MatchStatusDto::Played,
            MatchStatus::Cancelled => MatchStatusDto::Cancelled,
        }
    }
}

impl From<MatchStatusDto> for MatchStatus {
    fn from(status: MatchStatusDto) -> Self {
        match status {
            MatchStatusDto::Pending => MatchStatus::Pending,
            MatchStatusDto::Played => MatchStatus::Played,
            MatchStatusDto::Cancelled => MatchStatus::Cancelled,
        }
    }
}

/// Optional filter applied when listing matches.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MatchListQuery {
    pub status: Option<MatchStatusDto>,
}

/// Payload used to schedule a match.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateMatchRequest {
    #[serde(with = "match_date")]
    #[schema(value_type = String, format = Date, example = "2024-05-18")]
    pub date: Date,
    #[serde(with = "kickoff_time")]
    #[schema(value_type = String, example = "19:00")]
    pub kickoff: Time,
    #[validate(length(max = 120), custom(function = validate_not_blank))]
    pub venue: String,
}

/// Figures recorded for one player in a played match.
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct PlayerStatsInput {
    pub player_id: Uuid,
    pub team_id: Uuid,
    #[serde(default)]
    #[validate(range(max = 50))]
    pub goals: u32,
    #[serde(default)]
    #[validate(range(max = 50))]
    pub assists: u32,
    #[serde(default)]
    #[validate(range(max = 2))]
    pub yellow_cards: u32,
    #[serde(default)]
    #[validate(range(max = 1))]
    pub red_cards: u32,
}

/// Final score of a match plus optional per-player figures.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RecordResultRequest {
    pub score_a: u32,
    pub score_b: u32,
    #[serde(default)]
    #[validate(nested)]
    pub player_stats: Vec<PlayerStatsInput>,
}

/// Projection of a match used in listings.
#[derive(Debug, Serialize, ToSchema)]
pub struct MatchSummary {
    pub id: Uuid,
    #[serde(with = "match_date")]
    #[schema(value_type = String, format = Date)]
    pub date: Date,
    #[serde(with = "kickoff_time")]
    #[schema(value_type = String)]
    pub kickoff: Time,
    pub venue: String,
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
    pub status: MatchStatusDto,
}

impl From<MatchEntity> for MatchSummary {
    fn from(game: MatchEntity) -> Self {
        Self {
            id: game.id,
            date: game.date,
            kickoff: game.kickoff,
            venue: game.venue,
            score_a: game.score_a,
            score_b: game.score_b,
            status: game.status.into(),
        }
    }
}

/// Figures of one player in one match.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatLine {
    pub goals: u32,
    pub assists: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
}

impl From<&PlayerStatsEntity> for StatLine {
    fn from(stats: &PlayerStatsEntity) -> Self {
        Self {
            goals: stats.goals,
            assists: stats.assists,
            yellow_cards: stats.yellow_cards,
            red_cards: stats.red_cards,
        }
    }
}

/// Member of a match team, with figures once the match is played.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamMemberView {
    pub id: Uuid,
    /// `None` when the player has since been removed from the roster.
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatLine>,
}

/// One side of a match.
#[derive(Debug, Serialize, ToSchema)]
pub struct MatchTeamView {
    pub id: Uuid,
    pub name: String,
    pub players: Vec<TeamMemberView>,
}

/// Full view of a match with its teams.
#[derive(Debug, Serialize, ToSchema)]
pub struct MatchDetail {
    #[serde(flatten)]
    pub summary: MatchSummary,
    pub teams: Vec<MatchTeamView>,
}
