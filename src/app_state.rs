use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    services::{GenerationSettings, LlmClient, OpenAiLlmClient, QuizService},
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        config.validate()?;

        let llm_client = Arc::new(OpenAiLlmClient::new(&config));
        log::info!("Using model {}", llm_client.model_name());

        Ok(Self::from_parts(config, llm_client))
    }

    /// Wires the state around any model client.
    pub fn from_parts(config: Config, llm_client: Arc<dyn LlmClient>) -> Self {
        let quiz_service = Arc::new(QuizService::new(
            llm_client,
            GenerationSettings::from(&config),
        ));

        Self {
            quiz_service,
            config: Arc::new(config),
        }
    }
}
