//! DTO definitions for team generation.

use serde::{Deserialize, Serialize};
use time::{Date, Time};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dao::models::{kickoff_time, match_date};
use crate::dto::{player::PlayerBrief, validation::validate_unique_ids};

/// Selection of available players to split into two teams.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct GenerateTeamsRequest {
    #[validate(custom(function = validate_unique_ids))]
    pub player_ids: Vec<Uuid>,
}

/// One generated side with its average skill.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamPreview {
    pub name: String,
    pub players: Vec<PlayerBrief>,
    pub mean_skill: f64,
}

/// Result of a balancing run; nothing is persisted yet.
#[derive(Debug, Serialize, ToSchema)]
pub struct GeneratedTeamsResponse {
    pub team_a: TeamPreview,
    pub team_b: TeamPreview,
    /// Absolute difference between both mean skills.
    pub skill_gap: f64,
}

/// Confirmed teams to persist as a new pending match.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SaveTeamsRequest {
    #[validate(length(min = 1), custom(function = validate_unique_ids))]
    pub team_a: Vec<Uuid>,
    #[validate(length(min = 1), custom(function = validate_unique_ids))]
    pub team_b: Vec<Uuid>,
    /// Match day, defaults to today.
    #[serde(default, with = "match_date::option")]
    #[schema(value_type = Option<String>, format = Date, example = "2024-05-18")]
    pub date: Option<Date>,
    /// Kickoff (`HH:MM`), defaults to the configured kickoff.
    #[serde(default, with = "kickoff_time::option")]
    #[schema(value_type = Option<String>, example = "19:00")]
    pub kickoff: Option<Time>,
    /// Venue, defaults to the configured pitch.
    pub venue: Option<String>,
}
