pub mod aggregator;
pub mod encoding;
pub mod extractor;
pub mod generation_client;
pub mod grading;
pub mod prompt_builder;
pub mod quiz_generation_service;
pub mod response_parser;

pub use aggregator::TextAggregator;
pub use extractor::ContentExtractor;
pub use generation_client::{GeminiClient, GenerationClient};
pub use prompt_builder::{GenerationPayload, PromptBuilder};
pub use quiz_generation_service::QuizGenerationService;
