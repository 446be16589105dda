//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//!
//! Engine errors map onto status codes uniformly: invalid input is 400,
//! "correct request, nothing to compute" is 422, everything else is 500.

use super::{
    AppState,
    types::{
        AggregateRequest, AggregateResponse, GradeRequest, GradeResponse, HealthResponse,
        ReportRequest, ReportResponse, ScaleResponse,
    },
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use markbook_core::{
    EngineError, calculate_aggregate, calculate_grade, student_term_report,
    validate_and_normalize_score,
};

/// Status code for an engine error surfaced over HTTP.
fn error_status(error: &EngineError) -> StatusCode {
    match error {
        EngineError::ScoreOutOfRange { .. }
        | EngineError::InvalidGrade(_)
        | EngineError::Serialization(_) => StatusCode::BAD_REQUEST,
        EngineError::InsufficientData | EngineError::EmptyCategory(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        EngineError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// SCALE HANDLER
// =============================================================================

/// Get the grading scale.
pub async fn scale_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(ScaleResponse::current()))
}

// =============================================================================
// GRADE HANDLER
// =============================================================================

/// Validate and classify a single score.
pub async fn grade_handler(Json(request): Json<GradeRequest>) -> impl IntoResponse {
    match validate_and_normalize_score(request.score) {
        Ok(score) => {
            let grade = calculate_grade(score);
            (
                StatusCode::OK,
                Json(GradeResponse::success(score.value(), grade)),
            )
        }
        Err(e) => (error_status(&e), Json(GradeResponse::error(e.to_string()))),
    }
}

// =============================================================================
// AGGREGATE HANDLER
// =============================================================================

/// Aggregate core and elective grade lists.
pub async fn aggregate_handler(
    State(state): State<AppState>,
    Json(request): Json<AggregateRequest>,
) -> impl IntoResponse {
    let (core, elective) = match request.to_grades() {
        Ok(grades) => grades,
        Err(e) => {
            return (
                error_status(&e),
                Json(AggregateResponse::error(e.to_string())),
            );
        }
    };

    let elective_k = request
        .elective_k
        .unwrap_or(state.config.elective_select_count);

    match calculate_aggregate(&core, &elective, elective_k) {
        Ok(result) => (StatusCode::OK, Json(AggregateResponse::success(result))),
        Err(e) => (
            error_status(&e),
            Json(AggregateResponse::error(e.to_string())),
        ),
    }
}

// =============================================================================
// REPORT HANDLER
// =============================================================================

/// Compute a term report for one student of a submitted roster.
pub async fn report_handler(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> impl IntoResponse {
    let result = student_term_report(
        &request.roster.subjects,
        &request.roster.marks,
        &request.roster.class.category,
        request.student_id,
        &request.term,
        &request.exam_type,
        &state.config,
    );

    match result {
        Ok(report) => (StatusCode::OK, Json(ReportResponse::success(report))),
        Err(e) => (error_status(&e), Json(ReportResponse::error(e.to_string()))),
    }
}
