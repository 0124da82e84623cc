use std::{future::Future, sync::Arc, time::Duration};

use tokio::time::sleep;
use tracing::{info, warn};

use crate::{
    dao::{club_store::ClubStore, storage::StorageError},
    state::SharedState,
};

const INITIAL_DELAY: Duration = Duration::from_millis(1_000);
const MAX_DELAY: Duration = Duration::from_secs(10);
const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(5);
const MAX_RECONNECT_ATTEMPTS: u32 = 3;

/// Exponential delay doubling up to [`MAX_DELAY`].
struct Backoff {
    current: Duration,
}

impl Backoff {
    fn new() -> Self {
        Self {
            current: INITIAL_DELAY,
        }
    }

    fn reset(&mut self) {
        self.current = INITIAL_DELAY;
    }

    async fn wait(&mut self) {
        sleep(self.current).await;
        self.current = (self.current * 2).min(MAX_DELAY);
    }
}

/// Connect the club store and keep watching it, flipping degraded mode while it is unreachable.
///
/// Runs forever; spawn it on the runtime.
pub async fn run<F, Fut>(state: SharedState, mut connect: F)
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Arc<dyn ClubStore>, StorageError>> + Send,
{
    let mut backoff = Backoff::new();

    loop {
        match connect().await {
            Ok(store) => {
                state.set_club_store(store.clone()).await;
                info!("storage connection established; leaving degraded mode");
                backoff.reset();

                watch(&state, store.as_ref()).await;
                warn!("exhausted storage reconnect attempts; reconnecting from scratch");
            }
            Err(err) => warn!(error = %err, "storage connection attempt failed"),
        }
        backoff.wait().await;
    }
}

/// Poll `store` until it stays unreachable after [`MAX_RECONNECT_ATTEMPTS`] reconnects.
async fn watch(state: &SharedState, store: &dyn ClubStore) {
    loop {
        if store.health_check().await.is_ok() {
            if state.is_degraded().await {
                info!("storage healthy again; leaving degraded mode");
                state.update_degraded(false).await;
            }
            sleep(HEALTH_POLL_INTERVAL).await;
            continue;
        }

        if !reconnect(state, store).await {
            return;
        }
        state.update_degraded(false).await;
        sleep(HEALTH_POLL_INTERVAL).await;
    }
}

/// Try to revive `store`, entering degraded mode after the first failure.
async fn reconnect(state: &SharedState, store: &dyn ClubStore) -> bool {
    let mut backoff = Backoff::new();
    for attempt in 0..MAX_RECONNECT_ATTEMPTS {
        match store.try_reconnect().await {
            Ok(()) => {
                info!(attempt, "storage reconnection succeeded after health check failure");
                return true;
            }
            Err(err) => {
                if attempt == 0 {
                    warn!(attempt, error = %err, "storage reconnect failed; entering degraded mode");
                    state.update_degraded(true).await;
                } else {
                    warn!(attempt, error = %err, "storage reconnect attempt failed");
                }
                backoff.wait().await;
            }
        }
    }
    false
}
