use serde::Serialize;

/// Body returned when the generator declares the material insufficient.
#[derive(Debug, Clone, Serialize)]
pub struct InsufficientContentResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedItem {
    #[serde(rename = "quizID")]
    pub quiz_id: String,
    pub question_text: String,
    pub answer: String,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<String>,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeReport {
    pub score: u32,
    pub max_score: u32,
    pub details: Vec<GradedItem>,
}
