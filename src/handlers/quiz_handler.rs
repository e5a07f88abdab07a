use actix_web::{get, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::{
        domain::GenerationOutcome,
        dto::{
            request::{CreateQuizRequest, GradeQuizRequest},
            response::InsufficientContentResponse,
        },
    },
    services::grading::grade_quiz,
};

/// Shown to the user for malformed output and service failures. Details
/// stay in the log.
const GENERATION_FAILED_MESSAGE: &str = "the quiz could not be generated, please try again";

#[post("/api/create-quiz")]
async fn create_quiz(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<CreateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let request_id = get_request_id(&req).unwrap_or_default();
    let request = request.into_inner();
    request.validate()?;

    let (settings, sources) = request.into_parts()?;
    log::info!(
        "[{}] Creating quiz from {} source(s), quantity={:?} format={:?}",
        request_id,
        sources.len(),
        settings.quantity,
        settings.format
    );

    let outcome = state
        .quiz_generation_service
        .generate_quiz(&settings, sources)
        .await?;

    match outcome {
        GenerationOutcome::QuizSet(items) => {
            log::info!("[{}] Generated {} question(s)", request_id, items.len());
            Ok(HttpResponse::Ok().json(items))
        }
        GenerationOutcome::InsufficientContent(message) => {
            log::info!("[{}] Generator declined: {}", request_id, message);
            Ok(HttpResponse::Ok().json(InsufficientContentResponse { error: message }))
        }
        GenerationOutcome::MalformedOutput(_) | GenerationOutcome::ServiceFailure(_) => {
            log::error!("[{}] Quiz generation failed ({})", request_id, outcome.kind());
            Err(AppError::GenerationFailed(
                GENERATION_FAILED_MESSAGE.to_string(),
            ))
        }
    }
}

#[post("/api/grade-quiz")]
async fn grade_quiz_handler(
    req: HttpRequest,
    request: web::Json<GradeQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let report = grade_quiz(&request.quizzes, &request.answers);

    log::info!(
        "[{}] Graded quiz: {}/{}",
        get_request_id(&req).unwrap_or_default(),
        report.score,
        report.max_score
    );
    Ok(HttpResponse::Ok().json(report))
}

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
