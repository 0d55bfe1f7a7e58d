use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::ModelClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Present only when a Gemini key was configured.
    pub llm: Option<Arc<dyn ModelClient>>,
}

impl AppState {
    pub fn new(config: Config, llm: Option<Arc<dyn ModelClient>>) -> Self {
        Self {
            config: Arc::new(config),
            llm,
        }
    }

    /// The model client, or `Misconfigured` when no API key was set.
    pub fn model(&self) -> Result<&dyn ModelClient, AppError> {
        match &self.llm {
            Some(llm) if self.config.gemini_configured() => Ok(llm.as_ref()),
            _ => Err(AppError::Misconfigured("Gemini not configured".to_string())),
        }
    }
}
