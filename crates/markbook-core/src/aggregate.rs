//! # Aggregate Calculator
//!
//! Combines core grades with the best-performing subset of elective grades
//! into a single composite aggregate.
//!
//! The aggregate is a SUM OF GRADES on the 1-9 scale, not of raw scores, so
//! lower totals are better. Under the canonical 4-core + best-2-elective
//! configuration the range is 6 (all grade 1) to 54 (all grade 9); both
//! bounds are a function of the configuration, not constants.
//!
//! All arithmetic is integer-only; the aggregate is never fractional.

use crate::{EmptyCategoryPolicy, EngineError, Grade, Subject, SubjectType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// ENGINE CONFIGURATION
// =============================================================================

/// Default number of elective grades that count toward the aggregate.
pub const DEFAULT_ELECTIVE_SELECT_COUNT: usize = 2;

/// Explicit, passed-in engine configuration.
///
/// Replaces the per-school constants that used to live in one-off scripts;
/// the engine is reusable across school configurations without code edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Name patterns (case-insensitive substrings) that classify a subject
    /// as core even when its `subject_type` does not say so. Empty by
    /// default: classification then relies on `subject_type` alone.
    pub core_subject_names: BTreeSet<String>,
    /// How many elective grades count toward the aggregate.
    pub elective_select_count: usize,
    /// What to do when the category filter matches no subjects.
    pub on_empty_category: EmptyCategoryPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            core_subject_names: BTreeSet::new(),
            elective_select_count: DEFAULT_ELECTIVE_SELECT_COUNT,
            on_empty_category: EmptyCategoryPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Classify a subject as core or elective under this configuration.
    ///
    /// An explicit `subject_type` of core wins; otherwise the subject name
    /// is checked against the configured core-name patterns. Everything
    /// else is elective.
    #[must_use]
    pub fn is_core_subject(&self, subject: &Subject) -> bool {
        if subject.subject_type == SubjectType::Core {
            return true;
        }
        let name = subject.name.to_lowercase();
        self.core_subject_names
            .iter()
            .any(|pattern| name.contains(&pattern.to_lowercase()))
    }
}

// =============================================================================
// AGGREGATE RESULT
// =============================================================================

/// The composite aggregate with its integer breakdown.
///
/// The breakdown fields let report layers show how the total was reached
/// (which is all of the "transparency" the UI needs) without recomputing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Core sum plus selected elective sum.
    pub total: u32,
    /// Sum of all core grades.
    pub core_total: u32,
    /// Sum of the selected elective grades.
    pub elective_total: u32,
    /// Number of core grades that contributed.
    pub core_count: usize,
    /// Number of elective grades available before selection.
    pub electives_considered: usize,
    /// Number of elective grades that contributed (may be fewer than the
    /// configured count when data is thin).
    pub electives_selected: usize,
}

impl AggregateResult {
    /// The aggregate value itself.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.total
    }
}

impl std::fmt::Display for AggregateResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.total)
    }
}

// =============================================================================
// CALCULATION
// =============================================================================

fn grade_sum(grades: &[Grade]) -> u32 {
    grades.iter().map(|g| u32::from(g.value())).sum()
}

/// Calculate the composite aggregate.
///
/// Algorithm:
/// 1. Sum all core grades unconditionally.
/// 2. Stable-sort elective grades ascending (lower grade = better), so ties
///    keep their input order and the selection is deterministic.
/// 3. Select the first `elective_k` grades; when fewer electives exist, all
///    of them are selected (explicit policy, not truncation).
/// 4. Total = core sum + selected elective sum.
///
/// Zero core grades is not an error: some class configurations legitimately
/// have no core subjects, and the aggregate is then just the elective sum.
/// `EngineError::InsufficientData` is returned only when both lists are
/// empty.
pub fn calculate_aggregate(
    core_grades: &[Grade],
    elective_grades: &[Grade],
    elective_k: usize,
) -> Result<AggregateResult, EngineError> {
    if core_grades.is_empty() && elective_grades.is_empty() {
        return Err(EngineError::InsufficientData);
    }

    let core_total = grade_sum(core_grades);

    let mut sorted: Vec<Grade> = elective_grades.to_vec();
    // std's sort is stable: equal grades keep their original order.
    sorted.sort();
    let selected = &sorted[..sorted.len().min(elective_k)];
    let elective_total = grade_sum(selected);

    Ok(AggregateResult {
        total: core_total + elective_total,
        core_total,
        elective_total,
        core_count: core_grades.len(),
        electives_considered: elective_grades.len(),
        electives_selected: selected.len(),
    })
}

// =============================================================================
// TESTS
// =============================================================================
