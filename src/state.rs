use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::config::{NotifyConfig, ServerConfig};
use crate::services::resolution::Session;
use crate::utils::notifier::SnapshotNotifier;

/// Per-session state shared by the request handlers.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<RwLock<Session>>,
    pub notifier: SnapshotNotifier,
}

impl AppState {
    pub fn new(notify: NotifyConfig) -> Self {
        AppState {
            session: Arc::new(RwLock::new(Session::new())),
            notifier: SnapshotNotifier::new(notify),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.notify.clone())
    }
}
