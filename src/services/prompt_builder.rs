use once_cell::sync::Lazy;
use serde_json::json;

use crate::constants::quiz_prompt::{
    CHOICE_RULES, INSUFFICIENT_CONTENT_MESSAGE, NO_PREFERENCE, OUTPUT_CONTRACT_RULES,
    QUIZ_TASK_INSTRUCTION, SOURCE_ONLY_RULE, WRITE_RULES,
};
use crate::models::domain::{Corpus, FormatPreference, Quantity, QuizFormat, QuizItem, QuizSettings};

static QUIZ_ARRAY_SCHEMA: Lazy<String> = Lazy::new(|| {
    serde_json::to_string_pretty(&schemars::schema_for!(Vec<QuizItem>)).unwrap_or_default()
});

/// Everything the generation service needs for one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationPayload {
    pub prompt: String,
    /// Declare the service's web-search tool. Its results are never read back.
    pub search_grounding: bool,
}

#[derive(Clone, Debug)]
pub struct PromptBuilder {
    search_grounding: bool,
}

impl PromptBuilder {
    pub fn new(search_grounding: bool) -> Self {
        Self { search_grounding }
    }

    pub fn build(&self, corpus: &Corpus, settings: &QuizSettings) -> GenerationPayload {
        let insufficient = json!({ "error": INSUFFICIENT_CONTENT_MESSAGE }).to_string();

        let mut instructions = vec![
            format!("- Number of questions: {}", quantity_directive(settings.quantity)),
            format!("- Question format: {}", format_directive(settings.format)),
            format!(
                "- Additional requests from the user: {}",
                details_directive(&settings.details)
            ),
            format!("- {}", SOURCE_ONLY_RULE),
            format!(
                "- If the #Source material is not enough to create even one valid question, do not return an array. Return exactly {} instead.",
                insufficient
            ),
            OUTPUT_CONTRACT_RULES.to_string(),
        ];
        instructions.extend(format_rules(settings.format).iter().map(|r| r.to_string()));

        let example = serde_json::to_string_pretty(&example_items(settings.format))
            .unwrap_or_default();

        let sections = [
            QUIZ_TASK_INSTRUCTION.to_string(),
            format!("#Instructions\n{}", instructions.join("\n")),
            format!(
                "#Output format\n```json\n{}\n```\nEvery element of the array must conform to this JSON Schema:\n```json\n{}\n```",
                example,
                QUIZ_ARRAY_SCHEMA.as_str()
            ),
            format!("#Source material\n{}", corpus.as_str()),
        ];

        GenerationPayload {
            prompt: sections.join("\n\n"),
            search_grounding: self.search_grounding,
        }
    }
}

fn quantity_directive(quantity: Quantity) -> String {
    match quantity {
        Quantity::Auto => {
            "No preference. Decide a suitable number from the amount of material.".to_string()
        }
        Quantity::Count(n) => n.to_string(),
    }
}

fn format_directive(format: FormatPreference) -> &'static str {
    match format {
        FormatPreference::Auto => {
            "No preference. Choose \"choice\" or \"write\" for each question, whichever suits it."
        }
        FormatPreference::Choice => "Make every question multiple choice (\"choice\").",
        FormatPreference::Write => "Make every question free response (\"write\").",
    }
}

fn details_directive(details: &str) -> &str {
    let trimmed = details.trim();
    if trimmed.is_empty() {
        NO_PREFERENCE
    } else {
        trimmed
    }
}

// Unconstrained quizzes may mix both formats, so both rule sets apply.
fn format_rules(format: FormatPreference) -> &'static [&'static str] {
    match format {
        FormatPreference::Auto => &[CHOICE_RULES, WRITE_RULES],
        FormatPreference::Choice => &[CHOICE_RULES],
        FormatPreference::Write => &[WRITE_RULES],
    }
}

fn example_items(format: FormatPreference) -> Vec<QuizItem> {
    let choice = QuizItem {
        quiz_id: QuizItem::expected_id(1),
        format: QuizFormat::Choice,
        question_text: "Write the question here".to_string(),
        options: Some(vec![
            "Option 1".to_string(),
            "Option 2".to_string(),
            "...".to_string(),
            "Option n".to_string(),
        ]),
        answer: "The correct option, copied exactly".to_string(),
        explanation: "A short explanation of why this is the answer".to_string(),
    };
    let write = QuizItem {
        quiz_id: QuizItem::expected_id(1),
        format: QuizFormat::Write,
        question_text: "Write the question here".to_string(),
        options: None,
        answer: "The single correct answer".to_string(),
        explanation: "A short explanation of why this is the answer".to_string(),
    };

    match format {
        FormatPreference::Choice => vec![choice],
        FormatPreference::Write => vec![write],
        FormatPreference::Auto => vec![
            choice,
            QuizItem {
                quiz_id: QuizItem::expected_id(2),
                ..write
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(text: &str) -> Corpus {
        let mut corpus = Corpus::default();
        corpus.push_segment(text);
        corpus
    }

    #[test]
    fn prompt_carries_corpus_after_instructions() {
        let payload = PromptBuilder::new(true).build(
            &corpus("Mitochondria are the powerhouse of the cell."),
            &QuizSettings::default(),
        );

        let instructions_at = payload.prompt.find("\n#Instructions\n").unwrap();
        let source_at = payload.prompt.find("\n#Source material\n").unwrap();
        let corpus_at = payload
            .prompt
            .find("Mitochondria are the powerhouse of the cell.")
            .unwrap();

        assert!(payload.prompt.starts_with(QUIZ_TASK_INSTRUCTION));
        assert!(instructions_at < source_at && source_at < corpus_at);
        assert!(payload.search_grounding);
    }

    #[test]
    fn prompt_states_output_contract_and_escape_hatch() {
        let payload = PromptBuilder::new(false).build(&corpus("text"), &QuizSettings::default());

        assert!(payload.prompt.contains("q001, q002, q003"));
        assert!(payload.prompt.contains(&format!(
            "{{\"error\":\"{}\"}}",
            INSUFFICIENT_CONTENT_MESSAGE
        )));
        assert!(payload.prompt.contains("\"questionText\""));
        assert!(payload.prompt.contains(SOURCE_ONLY_RULE));
        assert!(!payload.search_grounding);
    }

    #[test]
    fn options_are_only_required_for_choice_questions() {
        let payload = PromptBuilder::new(true).build(&corpus("text"), &QuizSettings::default());
        let required = payload
            .prompt
            .lines()
            .find(|line| line.starts_with("- Every question must contain"))
            .unwrap();

        assert!(required.contains("\"answer\""));
        assert!(!required.contains("\"questionText\", \"options\""));
        assert!(required.contains("\"choice\" questions also contain \"options\""));
    }

    #[test]
    fn defaults_use_no_preference_phrasing() {
        let payload = PromptBuilder::new(true).build(&corpus("text"), &QuizSettings::default());

        assert!(payload
            .prompt
            .contains("- Number of questions: No preference."));
        assert!(payload.prompt.contains("- Question format: No preference."));
        assert!(payload
            .prompt
            .contains("- Additional requests from the user: No preference."));
        assert!(payload.prompt.contains(CHOICE_RULES));
        assert!(payload.prompt.contains(WRITE_RULES));
    }

    #[test]
    fn constrained_choice_format_only_carries_choice_rules() {
        let settings = QuizSettings {
            quantity: Quantity::Count(7),
            format: FormatPreference::Choice,
            details: "  focus on dates  ".to_string(),
        };
        let payload = PromptBuilder::new(true).build(&corpus("text"), &settings);

        assert!(payload.prompt.contains("- Number of questions: 7\n"));
        assert!(payload
            .prompt
            .contains("- Additional requests from the user: focus on dates\n"));
        assert!(payload.prompt.contains(CHOICE_RULES));
        assert!(!payload.prompt.contains(WRITE_RULES));
        assert!(!payload.prompt.contains("The single correct answer"));
    }

    #[test]
    fn constrained_write_format_carries_exact_match_rules() {
        let settings = QuizSettings {
            format: FormatPreference::Write,
            ..Default::default()
        };
        let payload = PromptBuilder::new(true).build(&corpus("text"), &settings);

        assert!(payload.prompt.contains("exact string match"));
        assert!(payload.prompt.contains("Bad: "));
        assert!(payload.prompt.contains("Good: "));
        assert!(!payload.prompt.contains(CHOICE_RULES));
        assert!(!payload.prompt.contains("\"options\": ["));
    }

    #[test]
    fn embedded_schema_names_wire_fields() {
        let schema = QUIZ_ARRAY_SCHEMA.as_str();

        assert!(schema.contains("quizID"));
        assert!(schema.contains("questionText"));
        assert!(schema.contains("choice"));
        assert!(schema.contains("write"));
    }

    #[test]
    fn build_is_deterministic() {
        let builder = PromptBuilder::new(true);
        let settings = QuizSettings::default();
        let corpus = corpus("same input");

        assert_eq!(builder.build(&corpus, &settings), builder.build(&corpus, &settings));
    }
}
