use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{GenerationOutcome, QuizSettings, Source};
use crate::services::aggregator::TextAggregator;
use crate::services::generation_client::GenerationClient;
use crate::services::prompt_builder::PromptBuilder;
use crate::services::response_parser::parse_response;

/// Sources in, quiz out: aggregation, prompt building, one generation call
/// and reply classification.
pub struct QuizGenerationService {
    aggregator: TextAggregator,
    prompt_builder: PromptBuilder,
    client: Arc<dyn GenerationClient>,
}

impl QuizGenerationService {
    pub fn new(
        aggregator: TextAggregator,
        prompt_builder: PromptBuilder,
        client: Arc<dyn GenerationClient>,
    ) -> Self {
        Self {
            aggregator,
            prompt_builder,
            client,
        }
    }

    /// Returns `NoExtractableText` when the sources yield no text. The
    /// generation service is not contacted in that case.
    pub async fn generate_quiz(
        &self,
        settings: &QuizSettings,
        sources: Vec<Source>,
    ) -> AppResult<GenerationOutcome> {
        let corpus = self.aggregator.aggregate(sources).await;
        if corpus.is_blank() {
            log::warn!("No text extracted from any source, skipping generation");
            return Err(AppError::NoExtractableText);
        }

        let payload = self.prompt_builder.build(&corpus, settings);

        let outcome = match self.client.generate(&payload).await {
            Ok(raw) => parse_response(&raw),
            Err(err) => {
                log::error!("Generation call failed: {}", err);
                GenerationOutcome::ServiceFailure(err.to_string())
            }
        };

        log::info!("Generation finished with outcome {}", outcome.kind());
        Ok(outcome)
    }
}
