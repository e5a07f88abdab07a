use once_cell::sync::Lazy;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

static META_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(source material|lecture material|provided (text|material|document|passage)|according to the (text|material|source|passage|document))\b",
    )
    .expect("META_REFERENCE is a valid regex pattern")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum QuizFormat {
    Choice, // pick one of `options`
    Write,  // free response, graded by exact match
}

/// One generated question, as exchanged with the generation service and the UI.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizItem {
    /// Sequential id: q001, q002, ...
    #[serde(rename = "quizID")]
    pub quiz_id: String,
    pub format: QuizFormat,
    pub question_text: String,
    /// Present only for `choice` questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub answer: String,
    #[serde(default)]
    pub explanation: String,
}

impl QuizItem {
    /// The id expected at a 1-based position in a quiz.
    pub fn expected_id(position: usize) -> String {
        format!("q{:03}", position)
    }

    /// Lists every way this item breaks the quiz contract. Nothing here is
    /// enforced; callers decide whether to log or reject.
    pub fn contract_issues(&self, position: usize) -> Vec<String> {
        let mut issues = Vec::new();

        let expected = Self::expected_id(position);
        if self.quiz_id != expected {
            issues.push(format!("quizID '{}' should be '{}'", self.quiz_id, expected));
        }

        if self.question_text.trim().is_empty() {
            issues.push("questionText is empty".to_string());
        } else if META_REFERENCE.is_match(&self.question_text) {
            issues.push("questionText refers to the source material".to_string());
        }

        match (self.format, &self.options) {
            (QuizFormat::Choice, None) => issues.push("choice question has no options".to_string()),
            (QuizFormat::Choice, Some(options)) => {
                if options.len() < 2 {
                    issues.push(format!(
                        "choice question has {} option(s), needs at least 2",
                        options.len()
                    ));
                }
                if !options.iter().any(|o| o == &self.answer) {
                    issues.push("answer is not one of the options".to_string());
                }
            }
            (QuizFormat::Write, Some(_)) => issues.push("write question carries options".to_string()),
            (QuizFormat::Write, None) => {}
        }

        issues
    }
}
