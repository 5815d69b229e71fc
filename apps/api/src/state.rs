use std::sync::Arc;

use crate::companion::orchestrator::Models;
use crate::config::Config;
use crate::llm_client::Inference;
use crate::session::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Inference backend. `GeminiClient` in production.
    pub llm: Arc<dyn Inference>,
    pub models: Models,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, llm: Arc<dyn Inference>) -> Self {
        let models = Models {
            study: config.study_model.clone(),
            review: config.review_model.clone(),
        };
        Self {
            sessions: SessionStore::new(),
            llm,
            models,
            config,
        }
    }
}
