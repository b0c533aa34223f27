//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::ShortenService;
use crate::config::ConfigHandle;

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<ShortenService>,
    /// Also read when the router is built, for settings like CORS origins.
    pub config: ConfigHandle,
}

impl AppState {
    pub fn new(shorten_service: Arc<ShortenService>, config: ConfigHandle) -> Self {
        Self {
            shorten_service,
            config,
        }
    }
}
