//! DTO definitions for fines tracking.

use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::dao::models::{FineEntity, match_date};
use crate::dto::validation::validate_not_blank;

/// Optional filter applied when listing fines.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FineListQuery {
    pub player_id: Option<Uuid>,
}

/// Payload used to fine a member.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateFineRequest {
    pub player_id: Uuid,
    #[validate(length(max = 200), custom(function = validate_not_blank))]
    pub reason: String,
    /// Amount in cents.
    #[validate(range(max = 100_000))]
    pub amount_cents: u64,
    /// Day of the fine, defaults to today.
    #[serde(default, with = "match_date::option")]
    #[schema(value_type = Option<String>, format = Date, example = "2024-05-18")]
    pub date: Option<Date>,
}

/// Public projection of a fine.
#[derive(Debug, Serialize, ToSchema)]
pub struct FineResponse {
    pub id: Uuid,
    pub player_id: Uuid,
    pub reason: String,
    pub amount_cents: u64,
    #[serde(with = "match_date")]
    #[schema(value_type = String, format = Date)]
    pub date: Date,
    pub paid: bool,
}

impl From<FineEntity> for FineResponse {
    fn from(fine: FineEntity) -> Self {
        Self {
            id: fine.id,
            player_id: fine.player_id,
            reason: fine.reason,
            amount_cents: fine.amount_cents,
            date: fine.date,
            paid: fine.paid,
        }
    }
}

/// Player paired with an accumulated amount.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct PlayerAmount {
    pub player_id: Uuid,
    pub name: Option<String>,
    pub amount_cents: u64,
}

/// Totals over every recorded fine.
#[derive(Debug, Serialize, ToSchema)]
pub struct FinesSummary {
    pub total_cents: u64,
    pub pending_cents: u64,
    pub pending_count: usize,
    /// Sum of paid fines, i.e. the money already in the kitty.
    pub collected_cents: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_fined: Option<PlayerAmount>,
}
