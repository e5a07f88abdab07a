use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::errors::{AppError, AppResult, GenerationFailure};
use crate::services::prompt_builder::GenerationPayload;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Lets the model decide how much to think.
const DYNAMIC_THINKING_BUDGET: i32 = -1;

/// One-shot text generation. Implementations return the raw reply text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, payload: &GenerationPayload) -> Result<String, GenerationFailure>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Value>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u64>,
    candidates_token_count: Option<u64>,
    total_token_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Client for the Gemini `generateContent` REST endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.generation_timeout())
            .build()
            .map_err(|e| AppError::InternalError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key: config.gemini_api_key.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(&self, payload: &GenerationPayload) -> Result<String, GenerationFailure> {
        let tools = if payload.search_grounding {
            vec![serde_json::json!({ "googleSearch": {} })]
        } else {
            Vec::new()
        };
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![TextPart {
                    text: &payload.prompt,
                }],
            }],
            tools,
            generation_config: GenerationConfig {
                thinking_config: ThinkingConfig {
                    thinking_budget: DYNAMIC_THINKING_BUDGET,
                },
            },
        };

        log::info!(
            "Calling model {} with a {} char prompt (search grounding: {})",
            self.model,
            payload.prompt.chars().count(),
            payload.search_grounding
        );

        let response = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GenerationFailure::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(GenerationFailure::from)?;

        if let Some(usage) = &body.usage_metadata {
            log::info!(
                "Token usage: prompt={:?} output={:?} total={:?}",
                usage.prompt_token_count,
                usage.candidates_token_count,
                usage.total_token_count
            );
        }

        // Whitespace-only text still goes to the parser.
        let text = reply_text(body);
        if text.is_empty() {
            return Err(GenerationFailure::EmptyResponse);
        }
        Ok(text)
    }
}

// Thought summaries are not part of the answer.
fn reply_text(response: GenerateContentResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter(|p| !p.thought)
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_wire_names() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![TextPart { text: "hi" }],
            }],
            tools: vec![serde_json::json!({ "googleSearch": {} })],
            generation_config: GenerationConfig {
                thinking_config: ThinkingConfig {
                    thinking_budget: DYNAMIC_THINKING_BUDGET,
                },
            },
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(value["tools"][0], serde_json::json!({ "googleSearch": {} }));
        assert_eq!(
            value["generationConfig"]["thinkingConfig"]["thinkingBudget"],
            -1
        );
    }

    #[test]
    fn tools_are_omitted_without_grounding() {
        let request = GenerateContentRequest {
            contents: Vec::new(),
            tools: Vec::new(),
            generation_config: GenerationConfig {
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            },
        };
        let value = serde_json::to_value(&request).unwrap();

        assert!(value.get("tools").is_none());
    }

    #[test]
    fn reply_text_joins_parts_and_skips_thoughts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[
                {"text":"planning...","thought":true},
                {"text":"[{\"quizID\":"},
                {"text":"\"q001\"}]"}
            ]}}]}"#,
        )
        .unwrap();

        assert_eq!(reply_text(response), "[{\"quizID\":\"q001\"}]");
    }

    #[test]
    fn reply_text_without_candidates_is_empty() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();

        assert_eq!(reply_text(response), "");
    }

    #[test]
    fn endpoint_joins_base_url_and_model() {
        let mut config = Config::test_config();
        config.gemini_base_url = "http://localhost:8080/v1beta/".to_string();
        let client = GeminiClient::from_config(&config).unwrap();

        assert_eq!(
            client.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-test:generateContent"
        );
    }
}
