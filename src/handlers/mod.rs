pub mod quiz_handler;

use actix_web::{error::JsonPayloadError, web};

use crate::errors::AppError;

pub use quiz_handler::{create_quiz, grade_quiz_handler, health_check};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(create_quiz)
        .service(grade_quiz_handler);
}

/// JSON extractor settings: body size limit, and payload errors reported in
/// the same `{error, code}` shape as every other failure.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            log::debug!("Rejected JSON payload: {}", err);
            match err {
                JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                    AppError::PayloadTooLarge(err.to_string()).into()
                }
                _ => AppError::ValidationError(err.to_string()).into(),
            }
        })
}
