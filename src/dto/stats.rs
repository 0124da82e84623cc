//! DTO definitions for aggregated statistics.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::fine::PlayerAmount;

/// Season totals for one player.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub player_id: Uuid,
    pub name: Option<String>,
    pub matches: u32,
    pub goals: u32,
    pub assists: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
}

/// Player paired with a counter (goals, assists).
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct PlayerTotal {
    pub player_id: Uuid,
    pub name: Option<String>,
    pub value: u32,
}

/// Headline figures of the peña.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub members: usize,
    pub pending_matches: usize,
    pub played_matches: usize,
    /// Played matches won by the first team.
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub goals_for: u32,
    pub goals_against: u32,
    pub fines_fund_cents: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_scorer: Option<PlayerTotal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_assister: Option<PlayerTotal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_fined: Option<PlayerAmount>,
}
