//! Application State

use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Client used to forward API calls to the backend
    pub http: reqwest::Client,

    /// Server settings (backend origin, static dir)
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }
}
