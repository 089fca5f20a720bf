use crate::config::BackendConfig;
use crate::session_controller::state::AdminSessions;
use crate::storage::TimetableStore;
use std::sync::Arc;
use std::time::Duration;

/// Everything a handler needs, registered once as `web::Data<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<BackendConfig>,
    pub store: Arc<TimetableStore>,
    pub sessions: AdminSessions,
}

impl AppState {
    pub fn new(config: BackendConfig, store: TimetableStore) -> Self {
        let sessions = AdminSessions::new(Duration::from_secs(config.session_ttl_secs));
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            sessions,
        }
    }
}
