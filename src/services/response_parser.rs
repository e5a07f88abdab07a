use serde_json::Value;

use crate::models::domain::{GenerationOutcome, QuizItem};

const FENCE: &str = "```";
const JSON_TAG: &str = "json";

/// Removes Markdown code fences around a reply, repeating until nothing
/// changes so that stripping twice is the same as stripping once.
pub fn strip_fence(raw: &str) -> &str {
    let mut current = raw.trim();
    loop {
        let next = strip_fence_once(current);
        if next.len() == current.len() {
            return current;
        }
        current = next;
    }
}

fn strip_fence_once(text: &str) -> &str {
    let mut text = text.trim();

    if let Some(rest) = text.strip_prefix(FENCE) {
        text = match rest.get(..JSON_TAG.len()) {
            Some(tag) if tag.eq_ignore_ascii_case(JSON_TAG) => &rest[JSON_TAG.len()..],
            _ => rest,
        };
    }
    if let Some(rest) = text.strip_suffix(FENCE) {
        text = rest;
    }

    text.trim()
}

/// Classifies a raw generation reply.
pub fn parse_response(raw: &str) -> GenerationOutcome {
    let normalized = strip_fence(raw);

    let value: Value = match serde_json::from_str(normalized) {
        Ok(value) => value,
        Err(err) => {
            log::error!("Generation reply is not valid JSON ({}): {}", err, raw);
            return GenerationOutcome::MalformedOutput(raw.to_string());
        }
    };

    match value {
        Value::Object(mut object) if object.contains_key("error") => {
            let message = match object.remove("error") {
                Some(Value::String(message)) => message,
                Some(other) => other.to_string(),
                None => String::new(),
            };
            GenerationOutcome::InsufficientContent(message)
        }
        Value::Array(elements) => {
            let mut items = Vec::with_capacity(elements.len());
            for (index, element) in elements.into_iter().enumerate() {
                match serde_json::from_value::<QuizItem>(element) {
                    Ok(item) => items.push(item),
                    Err(err) => {
                        log::error!(
                            "Quiz element {} does not match the item shape ({}): {}",
                            index + 1,
                            err,
                            raw
                        );
                        return GenerationOutcome::MalformedOutput(raw.to_string());
                    }
                }
            }

            for (index, item) in items.iter().enumerate() {
                for issue in item.contract_issues(index + 1) {
                    log::warn!("Quiz item {} breaks the output contract: {}", item.quiz_id, issue);
                }
            }

            GenerationOutcome::QuizSet(items)
        }
        _ => {
            log::error!("Generation reply has an unexpected JSON shape: {}", raw);
            GenerationOutcome::MalformedOutput(raw.to_string())
        }
    }
}
