//! # markbook-core
//!
//! The deterministic grade aggregation engine for Markbook - THE LOGIC.
//!
//! This crate implements the computational pipeline behind school term
//! reports: raw score -> validated score -> grade -> partitioned grade
//! sets -> aggregate. Data flows strictly one way and every operation is a
//! pure function of its explicit inputs.
//!
//! ## Pipeline
//!
//! 1. [`score`] - validates a raw numeric score into the accepted domain
//! 2. [`grade`] - maps a validated score to a 1-9 grade band and descriptor
//! 3. [`partition`] - splits a subject catalog into core and elective groups
//! 4. [`aggregate`] - combines core grades with the best-N elective grades
//! 5. [`report`] - runs the whole pipeline for a student/term/exam context
//!
//! ## Architectural Constraints
//!
//! - No async, no network, no storage: the engine consumes plain records
//!   and produces plain results
//! - Stateless across invocations; concurrent callers need no coordination
//! - Fail fast with a typed error, never silently correct input
//! - Integer arithmetic for aggregates; the aggregate is a derived,
//!   recomputable value and never a source of truth

// =============================================================================
// MODULES
// =============================================================================

pub mod aggregate;
pub mod grade;
pub mod partition;
pub mod report;
pub mod score;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    EngineError, Grade, MAX_GRADE, MAX_SCORE, MIN_GRADE, MIN_SCORE, Mark, RangeBound, SchoolClass,
    Score, Student, Subject, SubjectGradeEntry, SubjectType,
};

// =============================================================================
// RE-EXPORTS: Pipeline
// =============================================================================

pub use aggregate::{
    AggregateResult, DEFAULT_ELECTIVE_SELECT_COUNT, EngineConfig, calculate_aggregate,
};
pub use grade::{GRADE_SCALE, GradeBand, calculate_grade, get_grade_description};
pub use partition::{EmptyCategoryPolicy, SubjectPartition, partition_subjects};
pub use report::{TermReport, class_reports, student_term_report};
pub use score::{validate_and_normalize_score, validate_score};
