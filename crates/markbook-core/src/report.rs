//! # Term Report Pipeline
//!
//! The full score -> grade -> partition -> aggregate pipeline for one
//! student in one term/exam context, over plain records.
//!
//! The caller (report/dashboard layer) fetches subjects, marks and the
//! class category from storage and hands them in; the engine performs no
//! I/O and holds no state between calls, so batch jobs may invoke it from
//! many threads without coordination.

use crate::{
    AggregateResult, EngineConfig, EngineError, Mark, SchoolClass, Student, Subject,
    SubjectGradeEntry, SubjectType, calculate_aggregate, calculate_grade, partition_subjects,
    validate_and_normalize_score,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// TERM REPORT
// =============================================================================

/// One student's graded subjects and aggregate for a term/exam sitting.
///
/// Entries list core subjects first, then electives, each group in catalog
/// order. Every entry carries a `selected` flag so report layers can show
/// why an elective did or did not count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermReport {
    pub student_id: u32,
    pub term: String,
    pub exam_type: String,
    pub entries: Vec<SubjectGradeEntry>,
    pub aggregate: AggregateResult,
}

impl TermReport {
    /// Entries that counted toward the aggregate.
    pub fn selected_entries(&self) -> impl Iterator<Item = &SubjectGradeEntry> {
        self.entries.iter().filter(|e| e.selected)
    }
}

// =============================================================================
// PIPELINE
// =============================================================================

fn entry_for(
    subject: &Subject,
    subject_type: SubjectType,
    raw_score: f64,
) -> Result<SubjectGradeEntry, EngineError> {
    let score = validate_and_normalize_score(raw_score)?;
    let grade = calculate_grade(score);
    Ok(SubjectGradeEntry {
        subject_id: subject.id,
        subject_code: subject.code.clone(),
        subject_name: subject.name.clone(),
        subject_type,
        score,
        grade,
        selected: subject_type == SubjectType::Core,
    })
}

/// Compute the term report for a single student.
///
/// Marks are narrowed to the student/term/exam-type, each score is
/// validated and graded, subjects are partitioned for the class category,
/// and the best electives are selected by grade ascending with ties broken
/// by catalog order (stable, so the attribution is deterministic).
///
/// Subjects without a mark are skipped; they contribute nothing. The
/// result is `EngineError::InsufficientData` only when the student has no
/// gradeable subject at all for the context.
pub fn student_term_report(
    subjects: &[Subject],
    marks: &[Mark],
    class_category: &str,
    student_id: u32,
    term: &str,
    exam_type: &str,
    config: &EngineConfig,
) -> Result<TermReport, EngineError> {
    let partition = partition_subjects(subjects, class_category, config)?;

    // Latest entered mark wins when duplicates exist for a subject.
    let mut scores: BTreeMap<u32, f64> = BTreeMap::new();
    for mark in marks.iter().filter(|m| {
        m.student_id == student_id && m.term == term && m.exam_type == exam_type
    }) {
        scores.insert(mark.subject_id, mark.score);
    }

    let mut entries = Vec::new();
    let mut core_grades = Vec::new();
    for subject in &partition.core {
        let Some(&raw) = scores.get(&subject.id) else {
            continue;
        };
        let entry = entry_for(subject, SubjectType::Core, raw)?;
        core_grades.push(entry.grade);
        entries.push(entry);
    }

    let mut elective_grades = Vec::new();
    let elective_start = entries.len();
    for subject in &partition.elective {
        let Some(&raw) = scores.get(&subject.id) else {
            continue;
        };
        let entry = entry_for(subject, SubjectType::Elective, raw)?;
        elective_grades.push(entry.grade);
        entries.push(entry);
    }

    let aggregate =
        calculate_aggregate(&core_grades, &elective_grades, config.elective_select_count)?;

    // Mark the selected electives: best grades first, catalog order breaks
    // ties (stable sort over indices).
    let mut order: Vec<usize> = (0..elective_grades.len()).collect();
    order.sort_by_key(|&i| elective_grades[i]);
    for &i in order.iter().take(aggregate.electives_selected) {
        entries[elective_start + i].selected = true;
    }

    Ok(TermReport {
        student_id,
        term: term.to_string(),
        exam_type: exam_type.to_string(),
        entries,
        aggregate,
    })
}

/// Compute term reports for every student of a class.
///
/// Students with no gradeable data for the context are skipped rather than
/// failing the whole batch; any other error aborts and propagates.
pub fn class_reports(
    subjects: &[Subject],
    marks: &[Mark],
    class: &SchoolClass,
    students: &[Student],
    term: &str,
    exam_type: &str,
    config: &EngineConfig,
) -> Result<Vec<TermReport>, EngineError> {
    let mut reports = Vec::new();
    for student in students.iter().filter(|s| s.class_id == class.id) {
        match student_term_report(
            subjects,
            marks,
            &class.category,
            student.id,
            term,
            exam_type,
            config,
        ) {
            Ok(report) => reports.push(report),
            Err(EngineError::InsufficientData) => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(reports)
}

// =============================================================================
// TESTS
// =============================================================================
