//! Peña Back binary entrypoint wiring the REST API to the configured club store.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::{Context, bail};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pena_back::{
    config::AppConfig,
    dao::club_store::memory::MemoryClubStore,
    routes,
    state::{AppState, SharedState},
};

#[cfg(feature = "rest-store")]
use pena_back::{
    dao::{club_store::ClubStore, storage::StorageError},
    services::storage_supervisor,
};

/// Backend selected through `PENA_STORE`.
#[derive(Debug, Clone, Copy)]
enum StoreKind {
    Memory,
    #[cfg(feature = "rest-store")]
    Rest,
}

impl StoreKind {
    fn from_env() -> anyhow::Result<Self> {
        let value = env::var("PENA_STORE").unwrap_or_else(|_| "memory".into());
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            #[cfg(feature = "rest-store")]
            "rest" => Ok(Self::Rest),
            other => bail!("unsupported PENA_STORE value `{other}`"),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let store_kind = StoreKind::from_env()?;
    info!(store = ?store_kind, "selected club store");

    let app_state = AppState::new(config);
    spawn_store(&app_state, store_kind).await;

    let app = build_router(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Install the selected store, supervising backends that can drop their connection.
async fn spawn_store(state: &SharedState, kind: StoreKind) {
    match kind {
        StoreKind::Memory => {
            state
                .set_club_store(Arc::new(MemoryClubStore::new()))
                .await;
        }
        #[cfg(feature = "rest-store")]
        StoreKind::Rest => {
            use pena_back::dao::club_store::rest::{RestClubStore, RestConfig};

            tokio::spawn(storage_supervisor::run(state.clone(), || async {
                let store = RestClubStore::connect(RestConfig::from_env()?).await?;
                Ok::<_, StorageError>(Arc::new(store) as Arc<dyn ClubStore>)
            }));
        }
    }
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let Ok(mut term) = signal(SignalKind::terminate()) else {
            let _ = tokio::signal::ctrl_c().await;
            return;
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
