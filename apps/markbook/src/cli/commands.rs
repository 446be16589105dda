//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api;
use crate::config::SchoolConfig;
use crate::roster::Roster;
use markbook_core::{
    EngineError, GRADE_SCALE, TermReport, calculate_grade, class_reports, student_term_report,
    validate_and_normalize_score, validate_score,
};
use std::path::Path;

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, EngineError> {
    serde_json::to_string_pretty(value).map_err(|e| EngineError::Serialization(e.to_string()))
}

// =============================================================================
// SERVE COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_serve(config: SchoolConfig, host: &str, port: u16) -> Result<(), EngineError> {
    println!("Markbook Grade Aggregation Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:              {}", host);
    println!("  Port:              {}", port);
    if !config.school.name.is_empty() {
        println!("  School:            {}", config.school.name);
    }
    println!(
        "  Electives counted: {}",
        config.grading.elective_select_count
    );
    println!();
    println!("Endpoints:");
    println!("  GET  /health    - Health check");
    println!("  GET  /scale     - Grading scale");
    println!("  POST /grade     - Classify a score");
    println!("  POST /aggregate - Aggregate grade lists");
    println!("  POST /report    - Term report for a roster");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    let state = api::AppState::new(config.engine_config());
    api::run_server(&addr, state).await
}

// =============================================================================
// SCALE COMMAND
// =============================================================================

/// Print the grading scale.
pub fn cmd_scale(json_mode: bool) -> Result<(), EngineError> {
    if json_mode {
        println!("{}", to_pretty_json(&GRADE_SCALE)?);
        return Ok(());
    }

    println!("Grading scale (1 best, 9 worst):");
    println!();
    let mut upper = 100.0_f64;
    for band in &GRADE_SCALE {
        println!(
            "  Grade {}  {:>5} - {:<6}  {}",
            band.grade, band.min_score, upper, band.descriptor
        );
        upper = band.min_score;
    }
    Ok(())
}

// =============================================================================
// GRADE COMMAND
// =============================================================================

/// Validate and classify a single score.
pub fn cmd_grade(json_mode: bool, raw: f64) -> Result<(), EngineError> {
    let score = validate_and_normalize_score(raw)?;
    let grade = calculate_grade(score);

    if json_mode {
        let value = serde_json::json!({
            "score": score.value(),
            "grade": grade.value(),
            "descriptor": grade.descriptor(),
        });
        println!("{}", to_pretty_json(&value)?);
    } else {
        println!(
            "Score {} -> Grade {} ({})",
            score,
            grade,
            grade.descriptor()
        );
    }
    Ok(())
}

// =============================================================================
// REPORT COMMAND
// =============================================================================

/// Compute term reports for one student or the whole class.
pub fn cmd_report(
    config: &SchoolConfig,
    json_mode: bool,
    file: &Path,
    student: Option<u32>,
    term: &str,
    exam_type: &str,
) -> Result<(), EngineError> {
    let roster = Roster::load(file)?;
    let engine_config = config.engine_config();

    let reports = match student {
        Some(student_id) => vec![student_term_report(
            &roster.subjects,
            &roster.marks,
            &roster.class.category,
            student_id,
            term,
            exam_type,
            &engine_config,
        )?],
        None => class_reports(
            &roster.subjects,
            &roster.marks,
            &roster.class,
            &roster.students,
            term,
            exam_type,
            &engine_config,
        )?,
    };

    if json_mode {
        println!("{}", to_pretty_json(&reports)?);
        return Ok(());
    }

    for report in &reports {
        print_report(&roster, report);
        println!();
    }
    println!("{} report(s) for class '{}'", reports.len(), roster.class.name);
    Ok(())
}

fn print_report(roster: &Roster, report: &TermReport) {
    let name = roster
        .student(report.student_id)
        .map_or_else(|| format!("Student {}", report.student_id), |s| s.full_name());

    println!("{} - {} ({})", name, report.term, report.exam_type);
    for entry in &report.entries {
        let counted = if entry.selected { "counted" } else { "-" };
        println!(
            "  {:<8} {:<28} {:>6.2}%  Grade {} ({:<12}) [{}]",
            entry.subject_code,
            entry.subject_name,
            entry.score.value(),
            entry.grade,
            entry.grade.descriptor(),
            counted
        );
    }
    println!(
        "  Aggregate: {} (core {} over {} subject(s), electives {} from {} of {} considered)",
        report.aggregate.total,
        report.aggregate.core_total,
        report.aggregate.core_count,
        report.aggregate.elective_total,
        report.aggregate.electives_selected,
        report.aggregate.electives_considered,
    );
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Validate every mark score in a roster file.
pub fn cmd_check(json_mode: bool, file: &Path) -> Result<(), EngineError> {
    let roster = Roster::load(file)?;

    let invalid: Vec<_> = roster
        .marks
        .iter()
        .filter(|m| !validate_score(m.score))
        .collect();

    if json_mode {
        let value = serde_json::json!({
            "total_marks": roster.marks.len(),
            "invalid_marks": invalid,
        });
        println!("{}", to_pretty_json(&value)?);
        return Ok(());
    }

    for mark in &invalid {
        println!(
            "INVALID: student {} subject {} {} ({}): score {}",
            mark.student_id, mark.subject_id, mark.term, mark.exam_type, mark.score
        );
    }
    println!(
        "{} of {} mark(s) out of range",
        invalid.len(),
        roster.marks.len()
    );
    Ok(())
}
