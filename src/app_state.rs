use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    services::{
        ContentExtractor, GeminiClient, GenerationClient, PromptBuilder, QuizGenerationService,
        TextAggregator,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_generation_service: Arc<QuizGenerationService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let client = Arc::new(GeminiClient::from_config(&config)?);
        Self::with_generation_client(config, client)
    }

    /// Wires the pipeline around any generation backend.
    pub fn with_generation_client(
        config: Config,
        client: Arc<dyn GenerationClient>,
    ) -> AppResult<Self> {
        let extractor = ContentExtractor::new(config.source_fetch_timeout())?;
        let quiz_generation_service = Arc::new(QuizGenerationService::new(
            TextAggregator::new(extractor),
            PromptBuilder::new(config.search_grounding),
            client,
        ));

        Ok(Self {
            quiz_generation_service,
            config: Arc::new(config),
        })
    }
}
