//! Integration tests for the Markbook HTTP API.
//!
//! Uses axum-test to test the API handlers without starting a real server.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum::http::StatusCode;
use axum_test::TestServer;
use markbook::api::{
    AggregateResponse, AppState, GradeResponse, HealthResponse, ReportResponse, ScaleResponse,
    create_router,
};
use markbook_core::{EngineConfig, EmptyCategoryPolicy};
use serde_json::json;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Create a test server with the default engine configuration.
fn create_test_server() -> TestServer {
    let state = AppState::new(EngineConfig::default());
    TestServer::new(create_router(state)).unwrap()
}

/// Create a test server with a custom engine configuration.
fn create_test_server_with(config: EngineConfig) -> TestServer {
    let state = AppState::new(config);
    TestServer::new(create_router(state)).unwrap()
}

/// A minimal roster payload: 2 core subjects, 3 electives, one student.
fn sample_roster() -> serde_json::Value {
    json!({
        "class": { "id": 1, "name": "JHS 2", "category": "JHS" },
        "subjects": [
            { "id": 1, "name": "Mathematics", "code": "MATH", "category": "JHS", "subject_type": "core" },
            { "id": 2, "name": "English Language", "code": "ENG", "category": "JHS", "subject_type": "core" },
            { "id": 3, "name": "Creative Arts", "code": "ART", "category": "JHS", "subject_type": "elective" },
            { "id": 4, "name": "French", "code": "FRE", "category": "JHS", "subject_type": "elective" },
            { "id": 5, "name": "ICT", "code": "ICT", "category": "JHS", "subject_type": "elective" }
        ],
        "students": [
            { "id": 1, "first_name": "Ama", "last_name": "Mensah", "class_id": 1 }
        ],
        "marks": [
            { "student_id": 1, "subject_id": 1, "term": "Term 3", "exam_type": "End of Term", "score": 85.0 },
            { "student_id": 1, "subject_id": 2, "term": "Term 3", "exam_type": "End of Term", "score": 72.0 },
            { "student_id": 1, "subject_id": 3, "term": "Term 3", "exam_type": "End of Term", "score": 66.0 },
            { "student_id": 1, "subject_id": 4, "term": "Term 3", "exam_type": "End of Term", "score": 91.0 },
            { "student_id": 1, "subject_id": 5, "term": "Term 3", "exam_type": "End of Term", "score": 40.0 }
        ]
    })
}

// =============================================================================
// HEALTH ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// SCALE ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_scale_endpoint() {
    let server = create_test_server();

    let response = server.get("/scale").await;

    response.assert_status_ok();
    let scale: ScaleResponse = response.json();
    assert_eq!(scale.bands.len(), 9);
    assert_eq!(scale.bands[0].grade, 1);
    assert_eq!(scale.bands[0].descriptor, "HIGHEST");
    assert_eq!(scale.bands[8].grade, 9);
    assert_eq!(scale.bands[8].min_score, 0.0);
}

// =============================================================================
// GRADE ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_grade_valid_score() {
    let server = create_test_server();

    let response = server.post("/grade").json(&json!({ "score": 72.5 })).await;

    response.assert_status_ok();
    let body: GradeResponse = response.json();
    assert!(body.success);
    assert_eq!(body.grade, Some(2));
    assert_eq!(body.descriptor.as_deref(), Some("HIGHER"));
}

#[tokio::test]
async fn test_grade_boundary_scores() {
    let server = create_test_server();

    for (score, expected) in [(80.0, 1), (79.99, 2), (100.0, 1), (0.0, 9), (34.99, 9)] {
        let response = server.post("/grade").json(&json!({ "score": score })).await;
        response.assert_status_ok();
        let body: GradeResponse = response.json();
        assert_eq!(body.grade, Some(expected), "score {score}");
    }
}

#[tokio::test]
async fn test_grade_out_of_range_is_bad_request() {
    let server = create_test_server();

    let response = server.post("/grade").json(&json!({ "score": 100.5 })).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: GradeResponse = response.json();
    assert!(!body.success);
    assert!(body.error.unwrap().contains("100.5"));
}

#[tokio::test]
async fn test_grade_negative_score_is_bad_request() {
    let server = create_test_server();

    let response = server.post("/grade").json(&json!({ "score": -3.0 })).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

// =============================================================================
// AGGREGATE ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_aggregate_canonical_best_case() {
    let server = create_test_server();

    let response = server
        .post("/aggregate")
        .json(&json!({
            "core_grades": [1, 1, 1, 1],
            "elective_grades": [1, 1, 1, 1, 1]
        }))
        .await;

    response.assert_status_ok();
    let body: AggregateResponse = response.json();
    let aggregate = body.aggregate.unwrap();
    assert_eq!(aggregate.total, 6);
}

#[tokio::test]
async fn test_aggregate_canonical_worst_case() {
    let server = create_test_server();

    let response = server
        .post("/aggregate")
        .json(&json!({
            "core_grades": [9, 9, 9, 9],
            "elective_grades": [9, 9, 9, 9, 9]
        }))
        .await;

    response.assert_status_ok();
    let body: AggregateResponse = response.json();
    assert_eq!(body.aggregate.unwrap().total, 54);
}

#[tokio::test]
async fn test_aggregate_fewer_electives_than_k() {
    let server = create_test_server();

    let response = server
        .post("/aggregate")
        .json(&json!({
            "core_grades": [2, 3, 4, 5],
            "elective_grades": [7]
        }))
        .await;

    response.assert_status_ok();
    let body: AggregateResponse = response.json();
    let aggregate = body.aggregate.unwrap();
    assert_eq!(aggregate.total, 21);
    assert_eq!(aggregate.electives_selected, 1);
}

#[tokio::test]
async fn test_aggregate_elective_k_override() {
    let server = create_test_server();

    let response = server
        .post("/aggregate")
        .json(&json!({
            "core_grades": [],
            "elective_grades": [3, 1, 2, 5],
            "elective_k": 3
        }))
        .await;

    response.assert_status_ok();
    let body: AggregateResponse = response.json();
    assert_eq!(body.aggregate.unwrap().total, 6);
}

#[tokio::test]
async fn test_aggregate_uses_configured_k() {
    let config = EngineConfig {
        elective_select_count: 1,
        ..EngineConfig::default()
    };
    let server = create_test_server_with(config);

    let response = server
        .post("/aggregate")
        .json(&json!({
            "core_grades": [],
            "elective_grades": [4, 2, 3]
        }))
        .await;

    response.assert_status_ok();
    let body: AggregateResponse = response.json();
    assert_eq!(body.aggregate.unwrap().total, 2);
}

#[tokio::test]
async fn test_aggregate_invalid_grade_is_bad_request() {
    let server = create_test_server();

    let response = server
        .post("/aggregate")
        .json(&json!({
            "core_grades": [1, 10],
            "elective_grades": []
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: AggregateResponse = response.json();
    assert!(!body.success);
}

#[tokio::test]
async fn test_aggregate_empty_lists_is_unprocessable() {
    let server = create_test_server();

    let response = server
        .post("/aggregate")
        .json(&json!({
            "core_grades": [],
            "elective_grades": []
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

// =============================================================================
// REPORT ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_report_happy_path() {
    let server = create_test_server();

    let response = server
        .post("/report")
        .json(&json!({
            "roster": sample_roster(),
            "student_id": 1,
            "term": "Term 3",
            "exam_type": "End of Term"
        }))
        .await;

    response.assert_status_ok();
    let body: ReportResponse = response.json();
    let report = body.report.unwrap();
    // Core: 85 -> 1, 72 -> 2. Electives: 66 -> 3, 91 -> 1, 40 -> 8;
    // best two are 1 and 3.
    assert_eq!(report.aggregate.core_total, 3);
    assert_eq!(report.aggregate.elective_total, 4);
    assert_eq!(report.aggregate.total, 7);
    assert_eq!(report.entries.len(), 5);
}

#[tokio::test]
async fn test_report_unknown_context_is_unprocessable() {
    let server = create_test_server();

    let response = server
        .post("/report")
        .json(&json!({
            "roster": sample_roster(),
            "student_id": 1,
            "term": "Term 1",
            "exam_type": "Mid-term"
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: ReportResponse = response.json();
    assert!(!body.success);
}

#[tokio::test]
async fn test_report_invalid_score_is_bad_request() {
    let server = create_test_server();

    let mut roster = sample_roster();
    roster["marks"][0]["score"] = json!(120.0);

    let response = server
        .post("/report")
        .json(&json!({
            "roster": roster,
            "student_id": 1,
            "term": "Term 3",
            "exam_type": "End of Term"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_report_empty_category_policy_error() {
    let config = EngineConfig {
        on_empty_category: EmptyCategoryPolicy::Error,
        ..EngineConfig::default()
    };
    let server = create_test_server_with(config);

    let mut roster = sample_roster();
    roster["class"]["category"] = json!("Unknown Category");

    let response = server
        .post("/report")
        .json(&json!({
            "roster": roster,
            "student_id": 1,
            "term": "Term 3",
            "exam_type": "End of Term"
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: ReportResponse = response.json();
    assert!(body.error.unwrap().contains("Unknown Category"));
}

#[tokio::test]
async fn test_report_category_fallback_default() {
    let server = create_test_server();

    let mut roster = sample_roster();
    // Mismatched label: default policy falls back to the full catalog, so
    // the report still comes out.
    roster["class"]["category"] = json!("Junior High");

    let response = server
        .post("/report")
        .json(&json!({
            "roster": roster,
            "student_id": 1,
            "term": "Term 3",
            "exam_type": "End of Term"
        }))
        .await;

    response.assert_status_ok();
    let body: ReportResponse = response.json();
    assert_eq!(body.report.unwrap().aggregate.total, 7);
}
