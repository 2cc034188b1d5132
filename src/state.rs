use std::sync::Arc;

use crate::config::Config;
use crate::services::ServiceRegistry;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub services: ServiceRegistry,
}
