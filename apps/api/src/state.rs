use std::sync::Arc;

use crate::config::Config;
use crate::identity::IdentityStore;
use crate::jobs::store::JobStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub jobs: Arc<dyn JobStore>,
    pub identity: Arc<dyn IdentityStore>,
    pub config: Config,
}
