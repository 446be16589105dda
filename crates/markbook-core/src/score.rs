//! # Score Validator
//!
//! Boundary validation for raw percentage scores.
//!
//! Invalid input is rejected, never silently corrected: no clamping, no
//! rounding. Marks arrive from external entry forms and imports, so the
//! validator must treat every numeric value (negatives, sentinels, NaN) as
//! possible input.

use crate::{EngineError, Score};

/// Check whether a raw value is a valid percentage score.
///
/// Returns true iff `0 <= raw <= 100`. Pure predicate, never fails;
/// NaN compares false on both bounds and is therefore invalid.
#[must_use]
pub fn validate_score(raw: f64) -> bool {
    (crate::MIN_SCORE..=crate::MAX_SCORE).contains(&raw)
}

/// Validate a raw value into a [`Score`], unchanged.
///
/// Returns `EngineError::ScoreOutOfRange` carrying the offending value and
/// the violated bound when `raw < 0` or `raw > 100`. Boundary values 0 and
/// 100 are valid.
pub fn validate_and_normalize_score(raw: f64) -> Result<Score, EngineError> {
    Score::new(raw)
}

// =============================================================================
// TESTS
// =============================================================================
