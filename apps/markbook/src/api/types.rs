//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use crate::roster::Roster;
use markbook_core::{AggregateResult, EngineError, GRADE_SCALE, Grade, TermReport};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// SCALE RESPONSE
// =============================================================================

/// One grading band in a scale response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandInfo {
    pub grade: u8,
    pub min_score: f64,
    pub descriptor: String,
}

/// The full grading scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaleResponse {
    pub bands: Vec<BandInfo>,
}

impl ScaleResponse {
    /// Build the response from the engine's static scale table.
    #[must_use]
    pub fn current() -> Self {
        Self {
            bands: GRADE_SCALE
                .iter()
                .map(|band| BandInfo {
                    grade: band.grade,
                    min_score: band.min_score,
                    descriptor: band.descriptor.to_string(),
                })
                .collect(),
        }
    }
}

// =============================================================================
// GRADE REQUEST/RESPONSE
// =============================================================================

/// Score classification request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeRequest {
    pub score: f64,
}

/// Score classification response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeResponse {
    pub success: bool,
    pub score: Option<f64>,
    pub grade: Option<u8>,
    pub descriptor: Option<String>,
    pub error: Option<String>,
}

impl GradeResponse {
    pub fn success(score: f64, grade: Grade) -> Self {
        Self {
            success: true,
            score: Some(score),
            grade: Some(grade.value()),
            descriptor: Some(grade.descriptor().to_string()),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            score: None,
            grade: None,
            descriptor: None,
            error: Some(message),
        }
    }
}

// =============================================================================
// AGGREGATE REQUEST/RESPONSE
// =============================================================================

/// Aggregate calculation request over raw grade lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateRequest {
    pub core_grades: Vec<u8>,
    pub elective_grades: Vec<u8>,
    /// Overrides the configured elective selection count when present.
    #[serde(default)]
    pub elective_k: Option<usize>,
}

impl AggregateRequest {
    /// Validate the raw grade lists into typed grades.
    pub fn to_grades(&self) -> Result<(Vec<Grade>, Vec<Grade>), EngineError> {
        let core = self
            .core_grades
            .iter()
            .map(|&v| Grade::new(v))
            .collect::<Result<Vec<_>, _>>()?;
        let elective = self
            .elective_grades
            .iter()
            .map(|&v| Grade::new(v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((core, elective))
    }
}

/// Aggregate calculation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateResponse {
    pub success: bool,
    pub aggregate: Option<AggregateResult>,
    pub error: Option<String>,
}

impl AggregateResponse {
    pub fn success(aggregate: AggregateResult) -> Self {
        Self {
            success: true,
            aggregate: Some(aggregate),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            aggregate: None,
            error: Some(message),
        }
    }
}

// =============================================================================
// REPORT REQUEST/RESPONSE
// =============================================================================

/// Term report request: a roster document plus the report context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    pub roster: Roster,
    pub student_id: u32,
    pub term: String,
    pub exam_type: String,
}

/// Term report response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse {
    pub success: bool,
    pub report: Option<TermReport>,
    pub error: Option<String>,
}

impl ReportResponse {
    pub fn success(report: TermReport) -> Self {
        Self {
            success: true,
            report: Some(report),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            report: None,
            error: Some(message),
        }
    }
}
