use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Request body too large: {0}")]
    PayloadTooLarge(String),

    #[error("No text could be extracted from the supplied sources")]
    NoExtractableText,

    #[error("Failed to generate quiz: {0}")]
    GenerationFailed(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::NoExtractableText => "NO_EXTRACTABLE_TEXT",
            AppError::GenerationFailed(_) => "GENERATION_FAILED",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NoExtractableText => StatusCode::BAD_REQUEST,
            AppError::GenerationFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        log::debug!("Responding with {} ({})", self.error_code(), self);
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
        })
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<base64::DecodeError> for AppError {
    fn from(err: base64::DecodeError) -> Self {
        AppError::ValidationError(format!("file data is not valid base64: {}", err))
    }
}

/// Why a single source produced no text. Never escapes the aggregator.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("server responded with HTTP {0}")]
    HttpStatus(u16),

    #[error("unsupported character encoding '{0}'")]
    UnsupportedEncoding(String),

    #[error("could not read PDF: {0}")]
    Pdf(String),

    #[error("could not read DOCX: {0}")]
    Docx(String),

    #[error("unsupported file type for '{name}' (declared as '{mime}')")]
    UnsupportedFileType { name: String, mime: String },

    #[error("extraction worker stopped unexpectedly: {0}")]
    Worker(String),
}

/// Failure of the generation service call itself, as opposed to a reply
/// that turned out to be unusable.
#[derive(Debug, Error)]
pub enum GenerationFailure {
    #[error("generation service request failed: {0}")]
    Transport(String),

    #[error("generation service timed out")]
    Timeout,

    #[error("generation service returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("generation service did not return any text")]
    EmptyResponse,
}

impl From<reqwest::Error> for GenerationFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GenerationFailure::Timeout
        } else {
            GenerationFailure::Transport(err.to_string())
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::ValidationError("test".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::PayloadTooLarge("test".into()).status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            AppError::NoExtractableText.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::GenerationFailed("test".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::InternalError("test".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::ValidationError("quantity".into());
        assert_eq!(err.to_string(), "Validation error: quantity");
    }

    #[actix_web::test]
    async fn test_error_response_body_has_error_field() {
        let response = AppError::NoExtractableText.error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], 400);
        assert!(json["error"].as_str().unwrap().contains("No text"));
    }

    #[test]
    fn test_generation_failure_messages() {
        let err = GenerationFailure::Status {
            status: 503,
            message: "overloaded".into(),
        };
        assert_eq!(
            err.to_string(),
            "generation service returned HTTP 503: overloaded"
        );
        assert_eq!(
            GenerationFailure::EmptyResponse.to_string(),
            "generation service did not return any text"
        );
    }
}
