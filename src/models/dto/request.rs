use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use std::collections::HashMap;
use validator::Validate;

use crate::errors::AppResult;
use crate::models::domain::{QuizItem, QuizSettings, Source};

/// An uploaded document, inlined as base64 in the JSON body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFileDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[serde(default)]
    pub mime_type: String,

    /// Base64 (standard alphabet) file contents.
    pub data: String,
}

impl UploadedFileDto {
    pub fn into_source(self) -> AppResult<Source> {
        let bytes = STANDARD.decode(self.data.trim())?;
        Ok(Source::file(self.name, self.mime_type, bytes))
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[serde(default)]
    #[validate(nested)]
    pub settings: QuizSettings,

    #[serde(default)]
    pub urls: Vec<String>,

    #[serde(default)]
    #[validate(nested)]
    pub files: Vec<UploadedFileDto>,
}

impl CreateQuizRequest {
    /// Splits the request into settings and sources, URLs first then files,
    /// each in submission order. Blank URL lines are dropped.
    pub fn into_parts(self) -> AppResult<(QuizSettings, Vec<Source>)> {
        let mut sources: Vec<Source> = self
            .urls
            .into_iter()
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .map(Source::url)
            .collect();

        for file in self.files {
            sources.push(file.into_source()?);
        }

        Ok((self.settings, sources))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GradeQuizRequest {
    pub quizzes: Vec<QuizItem>,

    /// Submitted answers keyed by quizID.
    #[serde(default)]
    pub answers: HashMap<String, String>,
}
