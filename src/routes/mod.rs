use axum::Router;

use crate::state::SharedState;

pub mod docs;
pub mod fines;
pub mod health;
pub mod matches;
pub mod players;
pub mod stats;
pub mod teams;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(players::router())
        .merge(teams::router())
        .merge(matches::router())
        .merge(fines::router())
        .merge(stats::router());

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}
