use std::{cmp::Reverse, collections::HashMap, time::SystemTime};

use indexmap::IndexMap;
use tracing::info;
use uuid::Uuid;

use crate::{
    dao::models::FineEntity,
    dto::fine::{CreateFineRequest, FineListQuery, FineResponse, FinesSummary, PlayerAmount},
    error::ServiceError,
    services::{match_service, player_service},
    state::SharedState,
};

/// List fines newest first, optionally only those of one player.
pub async fn list_fines(
    state: &SharedState,
    query: FineListQuery,
) -> Result<Vec<FineResponse>, ServiceError> {
    let store = state.require_club_store().await?;
    let mut fines = store
        .list_fines()
        .await?
        .into_iter()
        .filter(|fine| query.player_id.is_none_or(|id| fine.player_id == id))
        .collect::<Vec<_>>();
    fines.sort_by_key(|fine| Reverse((fine.date, fine.created_at)));
    Ok(fines.into_iter().map(Into::into).collect())
}

/// Impose an unpaid fine on an existing member.
pub async fn create_fine(
    state: &SharedState,
    request: CreateFineRequest,
) -> Result<FineResponse, ServiceError> {
    let store = state.require_club_store().await?;
    player_service::load_player(state, request.player_id).await?;

    let reason = request.reason.trim().to_string();
    if reason.is_empty() {
        return Err(ServiceError::InvalidInput("reason must not be empty".into()));
    }

    let fine = FineEntity {
        id: Uuid::new_v4(),
        player_id: request.player_id,
        reason,
        amount_cents: request.amount_cents,
        date: request.date.unwrap_or_else(match_service::today),
        paid: false,
        created_at: SystemTime::now(),
    };
    store.save_fine(fine.clone()).await?;

    info!(fine_id = %fine.id, player_id = %fine.player_id, amount_cents = fine.amount_cents, "imposed fine");
    Ok(fine.into())
}

/// Flag a fine as settled (`paid = true`) or outstanding again.
pub async fn set_paid(
    state: &SharedState,
    id: Uuid,
    paid: bool,
) -> Result<FineResponse, ServiceError> {
    let store = state.require_club_store().await?;
    let mut fine = store
        .find_fine(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("fine `{id}` not found")))?;

    if fine.paid != paid {
        fine.paid = paid;
        store.save_fine(fine.clone()).await?;
        info!(fine_id = %id, paid, "updated fine payment");
    }
    Ok(fine.into())
}

pub async fn fines_summary(state: &SharedState) -> Result<FinesSummary, ServiceError> {
    let store = state.require_club_store().await?;
    let fines = store.list_fines().await?;
    let names = player_names(state).await?;
    Ok(summarize(&fines, &names))
}

pub(crate) async fn player_names(
    state: &SharedState,
) -> Result<HashMap<Uuid, String>, ServiceError> {
    let store = state.require_club_store().await?;
    Ok(store
        .list_players()
        .await?
        .into_iter()
        .map(|player| (player.id, player.name))
        .collect())
}

pub(crate) fn summarize(fines: &[FineEntity], names: &HashMap<Uuid, String>) -> FinesSummary {
    let mut summary = FinesSummary {
        total_cents: 0,
        pending_cents: 0,
        pending_count: 0,
        collected_cents: 0,
        most_fined: None,
    };

    for fine in fines {
        summary.total_cents = summary.total_cents.saturating_add(fine.amount_cents);
        if fine.paid {
            summary.collected_cents = summary.collected_cents.saturating_add(fine.amount_cents);
        } else {
            summary.pending_cents = summary.pending_cents.saturating_add(fine.amount_cents);
            summary.pending_count += 1;
        }
    }

    summary.most_fined = most_fined(fines, names);
    summary
}

/// Player with the largest accumulated fines; ties keep the first one seen.
fn most_fined(fines: &[FineEntity], names: &HashMap<Uuid, String>) -> Option<PlayerAmount> {
    let mut totals = IndexMap::<Uuid, u64>::new();
    for fine in fines {
        let total = totals.entry(fine.player_id).or_default();
        *total = total.saturating_add(fine.amount_cents);
    }

    let mut best: Option<(Uuid, u64)> = None;
    for (player_id, amount) in totals {
        if best.is_none_or(|(_, top)| amount > top) {
            best = Some((player_id, amount));
        }
    }

    best.map(|(player_id, amount_cents)| PlayerAmount {
        player_id,
        name: names.get(&player_id).cloned(),
        amount_cents,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use time::macros::date;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::club_store::memory::MemoryClubStore,
        dto::player::CreatePlayerRequest,
        state::AppState,
    };

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

    #[test]
    fn summary_splits_paid_and_pending() {
        let carlos = Uuid::new_v4();
        let raul = Uuid::new_v4();
        let names = HashMap::from([(carlos, "Carlos".to_string())]);
        let fines = [
            fine(carlos, 500, true),
            fine(raul, 300, false),
            fine(raul, 300, false),
            fine(carlos, 100, false),
        ];

        let summary = summarize(&fines, &names);
        assert_eq!(summary.total_cents, 1_200);
        assert_eq!(summary.collected_cents, 500);
        assert_eq!(summary.pending_cents, 700);
        assert_eq!(summary.pending_count, 3);
        assert_eq!(
            summary.most_fined,
            Some(PlayerAmount {
                player_id: carlos,
                name: Some("Carlos".into()),
                amount_cents: 600,
            })
        );
    }

    #[test]
    fn ties_for_most_fined_keep_first_player() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let fines = [fine(first, 200, false), fine(second, 200, true)];

        let summary = summarize(&fines, &HashMap::new());
        assert_eq!(summary.most_fined.map(|m| m.player_id), Some(first));
    }

    #[test]
    fn huge_amounts_saturate_instead_of_overflowing() {
        let carlos = Uuid::new_v4();
        let fines = [
            fine(carlos, u64::MAX, true),
            fine(carlos, 500, true),
            fine(carlos, 300, false),
        ];

        let summary = summarize(&fines, &HashMap::new());
        assert_eq!(summary.total_cents, u64::MAX);
        assert_eq!(summary.collected_cents, u64::MAX);
        assert_eq!(summary.pending_cents, 300);
        assert_eq!(summary.most_fined.map(|m| m.amount_cents), Some(u64::MAX));
    }

    #[test]
    fn empty_history_has_no_leader() {
        let summary = summarize(&[], &HashMap::new());
        assert_eq!(summary.total_cents, 0);
        assert!(summary.most_fined.is_none());
    }

    #[tokio::test]
    async fn fines_can_be_paid_and_reopened() {
        let state = AppState::with_store(AppConfig::default(), Arc::new(MemoryClubStore::new()));
        let player = player_service::create_player(
            &state,
            CreatePlayerRequest {
                name: "Javier".into(),
                email: "javier@example.com".into(),
                skill: None,
                position: None,
                image: None,
                role: None,
            },
        )
        .await
        .unwrap();

        let created = create_fine(
            &state,
            CreateFineRequest {
                player_id: player.id,
                reason: "Tarjeta roja".into(),
                amount_cents: 1_000,
                date: None,
            },
        )
        .await
        .unwrap();
        assert!(!created.paid);

        assert!(set_paid(&state, created.id, true).await.unwrap().paid);
        assert_eq!(fines_summary(&state).await.unwrap().collected_cents, 1_000);
        assert!(!set_paid(&state, created.id, false).await.unwrap().paid);
    }

    #[tokio::test]
    async fn fining_an_unknown_player_is_not_found() {
        let state = AppState::with_store(AppConfig::default(), Arc::new(MemoryClubStore::new()));
        let err = create_fine(
            &state,
            CreateFineRequest {
                player_id: Uuid::new_v4(),
                reason: "Ausencia".into(),
                amount_cents: 200,
                date: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
