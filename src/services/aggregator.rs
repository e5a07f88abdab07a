use crate::models::domain::{Corpus, Source};
use crate::services::extractor::ContentExtractor;

/// Runs extraction over every source, one at a time, and concatenates the
/// results in input order. A failed source is logged and skipped.
#[derive(Clone)]
pub struct TextAggregator {
    extractor: ContentExtractor,
}

impl TextAggregator {
    pub fn new(extractor: ContentExtractor) -> Self {
        Self { extractor }
    }

    pub async fn aggregate(&self, sources: Vec<Source>) -> Corpus {
        let total = sources.len();
        let mut corpus = Corpus::default();

        for (index, source) in sources.into_iter().enumerate() {
            let label = source.label().to_string();

            match self.extractor.extract(source).await {
                Ok(text) => {
                    log::info!(
                        "Extracted {} chars from source {}/{} ({})",
                        text.chars().count(),
                        index + 1,
                        total,
                        label
                    );
                    corpus.push_segment(&text);
                }
                Err(err) => {
                    log::warn!(
                        "Skipping source {}/{} ({}): {}",
                        index + 1,
                        total,
                        label,
                        err
                    );
                }
            }
        }

        log::info!(
            "Aggregated {} of {} sources into {} chars",
            corpus.segment_count(),
            total,
            corpus.as_str().len()
        );
        corpus
    }
}
