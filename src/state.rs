use crate::config::AppConfig;
use crate::services::summarizer::Summarizer;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub summarizer: Arc<dyn Summarizer>,
}

impl AppState {
    pub fn new(config: AppConfig, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            config: Arc::new(config),
            summarizer,
        }
    }
}
