use staffsearch_common::AppConfig;
use staffsearch_vector::SearchEngine;
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Search engine, built before the server starts and read-only afterwards
    pub engine: Arc<SearchEngine>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: AppConfig, engine: Arc<SearchEngine>) -> Self {
        Self { config, engine }
    }
}
