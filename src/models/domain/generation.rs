use crate::models::domain::QuizItem;

/// Terminal result of one generation round-trip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationOutcome {
    QuizSet(Vec<QuizItem>),
    /// The service declined: the corpus could not support any question.
    InsufficientContent(String),
    /// The service answered, but not with a usable quiz. Holds the raw reply.
    MalformedOutput(String),
    /// The service call failed or produced no text at all.
    ServiceFailure(String),
}

impl GenerationOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationOutcome::QuizSet(_) => "quiz_set",
            GenerationOutcome::InsufficientContent(_) => "insufficient_content",
            GenerationOutcome::MalformedOutput(_) => "malformed_output",
            GenerationOutcome::ServiceFailure(_) => "service_failure",
        }
    }
}
