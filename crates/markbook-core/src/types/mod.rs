//! # Core Type Definitions
//!
//! This module contains all domain types for the Markbook grade engine:
//! - Validated numeric types (`Score`, `Grade`)
//! - Subject metadata (`Subject`, `SubjectType`)
//! - Input records supplied by the caller (`Mark`, `Student`, `SchoolClass`)
//! - Per-report output rows (`SubjectGradeEntry`)
//! - Error types (`EngineError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Carry their invariants in the constructor (`Score` is always in range,
//!   `Grade` is always in `[1, 9]`)
//! - Are plain data: no interior mutability, no handles to storage or sessions
//! - Implement `Ord` where a deterministic ordering is required downstream

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// RANGE CONSTANTS
// =============================================================================

/// Lowest valid percentage score (inclusive).
pub const MIN_SCORE: f64 = 0.0;

/// Highest valid percentage score (inclusive).
pub const MAX_SCORE: f64 = 100.0;

/// Best grade on the 1-9 scale.
pub const MIN_GRADE: u8 = 1;

/// Worst grade on the 1-9 scale.
pub const MAX_GRADE: u8 = 9;

// =============================================================================
// SCORE
// =============================================================================

/// Which end of the valid score range a rejected value violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeBound {
    /// Value fell below the minimum (negative scores, NaN).
    Min,
    /// Value exceeded the maximum.
    Max,
}

impl std::fmt::Display for RangeBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeBound::Min => write!(f, "lower"),
            RangeBound::Max => write!(f, "upper"),
        }
    }
}

/// A validated percentage score in `[0, 100]`.
///
/// The only way to obtain a `Score` is through validation; out-of-range input
/// is rejected outright, never clamped or rounded. Downstream code can rely
/// on the range invariant (grade classification is infallible over `Score`).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Score(f64);

impl Score {
    /// Validate a raw value into a `Score`.
    ///
    /// Returns `EngineError::ScoreOutOfRange` when the value is negative,
    /// above 100, or NaN. Boundary values 0 and 100 are accepted.
    pub fn new(raw: f64) -> Result<Self, EngineError> {
        if raw.is_nan() || raw < MIN_SCORE {
            return Err(EngineError::ScoreOutOfRange {
                value: raw,
                bound: RangeBound::Min,
            });
        }
        if raw > MAX_SCORE {
            return Err(EngineError::ScoreOutOfRange {
                value: raw,
                bound: RangeBound::Max,
            });
        }
        Ok(Self(raw))
    }

    /// Get the raw percentage value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Score {
    type Error = EngineError;

    fn try_from(raw: f64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> Self {
        score.value()
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// =============================================================================
// GRADE
// =============================================================================

/// An ordinal grade in `[1, 9]` where 1 is the best outcome and 9 the worst.
///
/// The derived `Ord` is numeric ascending, so "lower is better" holds:
/// sorting a list of grades ascending puts the best performances first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Grade(u8);

impl Grade {
    /// The best possible grade (1, "HIGHEST").
    pub const BEST: Grade = Grade(MIN_GRADE);

    /// The worst possible grade (9, "LOWEST").
    pub const WORST: Grade = Grade(MAX_GRADE);

    /// Construct a grade, rejecting values outside `[1, 9]`.
    pub fn new(value: u8) -> Result<Self, EngineError> {
        if !(MIN_GRADE..=MAX_GRADE).contains(&value) {
            return Err(EngineError::InvalidGrade(value));
        }
        Ok(Self(value))
    }

    /// Construct without range checking. Callers must guarantee `[1, 9]`.
    pub(crate) const fn new_unchecked(value: u8) -> Self {
        Self(value)
    }

    /// Get the numeric grade value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Grade {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Grade> for u8 {
    fn from(grade: Grade) -> Self {
        grade.value()
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// SUBJECT METADATA
// =============================================================================

/// Classification of a subject for aggregate purposes.
///
/// Core subjects always count toward the aggregate; electives compete for the
/// best-N slots. Unrecognized or missing classifications deserialize to
/// `Elective` (the conservative default: "competes for selection" rather than
/// "always counts").
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum SubjectType {
    /// Mandatory subject; its grade always counts.
    Core,
    /// Optional subject; only the best N grades count.
    #[default]
    Elective,
}

impl From<String> for SubjectType {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<&str> for SubjectType {
    fn from(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("core") {
            SubjectType::Core
        } else {
            SubjectType::Elective
        }
    }
}

/// A subject from the school catalog.
///
/// Subject metadata is supplied by the caller and never mutated by the
/// engine. `category` names the class category the subject belongs to
/// ("Lower Primary", "Upper Primary", "JHS", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: u32,
    pub name: String,
    pub code: String,
    pub category: String,
    #[serde(default)]
    pub subject_type: SubjectType,
}

// =============================================================================
// INPUT RECORDS
// =============================================================================

/// A raw mark as entered for one student, subject, term and exam sitting.
///
/// The score is carried as entered; validation happens at the engine
/// boundary when the mark is consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    pub student_id: u32,
    pub subject_id: u32,
    pub term: String,
    pub exam_type: String,
    pub score: f64,
}

/// A student record, as much of it as the engine needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub class_id: u32,
}

impl Student {
    /// Full display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A class record; `category` drives subject filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolClass {
    pub id: u32,
    pub name: String,
    pub category: String,
}

// =============================================================================
// REPORT ROWS
// =============================================================================

/// One graded subject for one student in one term/exam context.
///
/// Ephemeral: constructed per aggregate calculation and discarded after.
/// `selected` records whether the entry counted toward the aggregate (always
/// true for core entries, true for the best-N electives).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectGradeEntry {
    pub subject_id: u32,
    pub subject_code: String,
    pub subject_name: String,
    pub subject_type: SubjectType,
    pub score: Score,
    pub grade: Grade,
    pub selected: bool,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Markbook engine.
///
/// - No silent correction: out-of-range input is rejected, never clamped
/// - Use `Result<T, EngineError>` for fallible operations
/// - Errors are raised at the point of detection and propagated unmodified;
///   the engine performs no retries and no partial-failure recovery
#[derive(Debug, Error)]
pub enum EngineError {
    /// A raw score fell outside `[0, 100]`. Carries the offending value and
    /// which bound it violated.
    #[error("Score must be between 0 and 100, got {value} (violates {bound} bound)")]
    ScoreOutOfRange { value: f64, bound: RangeBound },

    /// A grade value outside `[1, 9]` reached the descriptor lookup.
    /// Indicates a programming or data error upstream.
    #[error("Grade must be between 1 and 9, got {0}")]
    InvalidGrade(u8),

    /// Both the core and elective grade lists were empty; there is nothing
    /// to aggregate. Surfaced so callers can render "no data" rather than a
    /// misleading zero.
    #[error("No core or elective grades available to aggregate")]
    InsufficientData,

    /// The category filter matched no subjects and the configured policy is
    /// `EmptyCategoryPolicy::Error`.
    #[error("No subjects found for category '{0}'")]
    EmptyCategory(String),

    /// I/O failure in the app layer (file reads, network).
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization failure in the app layer.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

// =============================================================================
// TESTS
// =============================================================================
