use std::sync::Arc;

use tokio::sync::{RwLock, watch};

use crate::{config::AppConfig, dao::club_store::ClubStore, error::ServiceError};

pub type SharedState = Arc<AppState>;

/// Central application state holding the configuration and the storage handle.
///
/// Handlers receive it through axum's `State` extractor; nothing here is global.
pub struct AppState {
    config: AppConfig,
    club_store: RwLock<Option<Arc<dyn ClubStore>>>,
    degraded: watch::Sender<bool>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is installed.
    pub fn new(config: AppConfig) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            config,
            club_store: RwLock::new(None),
            degraded: degraded_tx,
        })
    }

    /// Construct a state with `store` already installed.
    pub fn with_store(config: AppConfig, store: Arc<dyn ClubStore>) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(false);
        Arc::new(Self {
            config,
            club_store: RwLock::new(Some(store)),
            degraded: degraded_tx,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Obtain a handle to the current club store, if one is installed.
    pub async fn club_store(&self) -> Option<Arc<dyn ClubStore>> {
        let guard = self.club_store.read().await;
        guard.as_ref().cloned()
    }

    /// Obtain the current club store or fail with [`ServiceError::Degraded`].
    pub async fn require_club_store(&self) -> Result<Arc<dyn ClubStore>, ServiceError> {
        if *self.degraded.borrow() {
            return Err(ServiceError::Degraded);
        }
        self.club_store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a new club store implementation and leave degraded mode.
    pub async fn set_club_store(&self, store: Arc<dyn ClubStore>) {
        {
            let mut guard = self.club_store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false).await;
    }

    /// Current degraded flag.
    pub async fn is_degraded(&self) -> bool {
        *self.degraded.borrow()
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Update and broadcast the degraded flag when the value changes.
    pub async fn update_degraded(&self, value: bool) {
        self.degraded.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
    }
}
