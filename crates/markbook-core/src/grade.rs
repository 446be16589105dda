//! # Grade Classifier
//!
//! Maps a validated score onto the fixed 1-9 grading scale used by
//! primary/basic schools.
//!
//! ## Grading Scale
//!
//! | Grade | Score floor | Descriptor   |
//! |-------|-------------|--------------|
//! | 1     | 80          | HIGHEST      |
//! | 2     | 70          | HIGHER       |
//! | 3     | 65          | HIGH         |
//! | 4     | 60          | HIGH AVERAGE |
//! | 5     | 55          | AVERAGE      |
//! | 6     | 50          | LOW AVERAGE  |
//! | 7     | 45          | LOW          |
//! | 8     | 35          | LOWER        |
//! | 9     | 0           | LOWEST       |
//!
//! Each band runs from its floor (inclusive) up to the next band's floor
//! (exclusive); the top band includes 100. The floors are contiguous, so
//! every value in `[0, 100]` maps to exactly one band.

use crate::{EngineError, Grade, MAX_GRADE, MIN_GRADE, Score};
use serde::Serialize;

// =============================================================================
// GRADING SCALE TABLE
// =============================================================================

/// One row of the grading scale.
///
/// Scores at or above `min_score` (and below the floor of the next better
/// band) map to `grade`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradeBand {
    /// Grade number, 1 (best) to 9 (worst).
    pub grade: u8,
    /// Inclusive score floor of this band.
    pub min_score: f64,
    /// Fixed human-readable label for the grade.
    pub descriptor: &'static str,
}

/// The fixed grading scale, ordered best grade first.
///
/// This table is static configuration, not derived at runtime. Row `i`
/// holds grade `i + 1`, which the descriptor lookup relies on.
pub const GRADE_SCALE: [GradeBand; 9] = [
    GradeBand { grade: 1, min_score: 80.0, descriptor: "HIGHEST" },
    GradeBand { grade: 2, min_score: 70.0, descriptor: "HIGHER" },
    GradeBand { grade: 3, min_score: 65.0, descriptor: "HIGH" },
    GradeBand { grade: 4, min_score: 60.0, descriptor: "HIGH AVERAGE" },
    GradeBand { grade: 5, min_score: 55.0, descriptor: "AVERAGE" },
    GradeBand { grade: 6, min_score: 50.0, descriptor: "LOW AVERAGE" },
    GradeBand { grade: 7, min_score: 45.0, descriptor: "LOW" },
    GradeBand { grade: 8, min_score: 35.0, descriptor: "LOWER" },
    GradeBand { grade: 9, min_score: 0.0, descriptor: "LOWEST" },
];

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Classify a validated score into a grade.
///
/// Infallible: `Score` guarantees `[0, 100]` and the scale has no gaps, so
/// every input lands in exactly one band. Deterministic and side-effect
/// free.
#[must_use]
pub fn calculate_grade(score: Score) -> Grade {
    let value = score.value();
    for band in &GRADE_SCALE {
        if value >= band.min_score {
            return Grade::new_unchecked(band.grade);
        }
    }
    // Unreachable for a validated Score: the last floor is 0.0.
    Grade::WORST
}

/// Look up the descriptor for an untyped grade number.
///
/// Returns `EngineError::InvalidGrade` for values outside `[1, 9]`; such a
/// value indicates corrupted upstream data, not a user mistake.
pub fn get_grade_description(grade: u8) -> Result<&'static str, EngineError> {
    if !(MIN_GRADE..=MAX_GRADE).contains(&grade) {
        return Err(EngineError::InvalidGrade(grade));
    }
    Ok(GRADE_SCALE[(grade - 1) as usize].descriptor)
}

impl Grade {
    /// The fixed descriptor for this grade (1 -> "HIGHEST" ... 9 -> "LOWEST").
    #[must_use]
    pub fn descriptor(self) -> &'static str {
        GRADE_SCALE[(self.value() - 1) as usize].descriptor
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn grade_of(raw: f64) -> u8 {
        calculate_grade(Score::new(raw).expect("valid score")).value()
    }

    #[test]
    fn band_floors_are_inclusive() {
        assert_eq!(grade_of(80.0), 1);
        assert_eq!(grade_of(70.0), 2);
        assert_eq!(grade_of(65.0), 3);
        assert_eq!(grade_of(60.0), 4);
        assert_eq!(grade_of(55.0), 5);
        assert_eq!(grade_of(50.0), 6);
        assert_eq!(grade_of(45.0), 7);
        assert_eq!(grade_of(35.0), 8);
        assert_eq!(grade_of(0.0), 9);
    }

    #[test]
    fn band_ceilings_are_exclusive() {
        assert_eq!(grade_of(79.99), 2);
        assert_eq!(grade_of(69.99), 3);
        assert_eq!(grade_of(64.99), 4);
        assert_eq!(grade_of(59.99), 5);
        assert_eq!(grade_of(54.99), 6);
        assert_eq!(grade_of(49.99), 7);
        assert_eq!(grade_of(44.99), 8);
        assert_eq!(grade_of(34.99), 9);
    }

    #[test]
    fn top_band_includes_hundred() {
        assert_eq!(grade_of(100.0), 1);
    }

    #[test]
    fn classification_is_idempotent() {
        let score = Score::new(72.5).expect("valid score");
        assert_eq!(calculate_grade(score), calculate_grade(score));
    }

    #[test]
    fn descriptors_match_table() {
        assert_eq!(get_grade_description(1).expect("valid"), "HIGHEST");
        assert_eq!(get_grade_description(5).expect("valid"), "AVERAGE");
        assert_eq!(get_grade_description(9).expect("valid"), "LOWEST");
    }

    #[test]
    fn descriptor_rejects_out_of_range_grade() {
        assert!(matches!(
            get_grade_description(0),
            Err(EngineError::InvalidGrade(0))
        ));
        assert!(matches!(
            get_grade_description(10),
            Err(EngineError::InvalidGrade(10))
        ));
    }

    #[test]
    fn typed_descriptor_matches_untyped_lookup() {
        for value in MIN_GRADE..=MAX_GRADE {
            let grade = Grade::new(value).expect("valid grade");
            assert_eq!(
                grade.descriptor(),
                get_grade_description(value).expect("valid")
            );
        }
    }

    #[test]
    fn scale_rows_are_indexed_by_grade() {
        for (i, band) in GRADE_SCALE.iter().enumerate() {
            assert_eq!(usize::from(band.grade), i + 1);
        }
    }
}
