//! # Markbook CLI Module
//!
//! This module implements the CLI interface for Markbook.
//!
//! ## Available Commands
//!
//! - `serve` - Start the HTTP server
//! - `scale` - Print the grading scale
//! - `grade` - Validate and classify a single score
//! - `report` - Compute term reports from a roster file
//! - `check` - Validate every mark score in a roster file

mod commands;

use crate::config::SchoolConfig;
use clap::{Parser, Subcommand};
use markbook_core::EngineError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Markbook - Grade Aggregation Service
///
/// A deterministic grading engine for school term reports: percentage
/// scores in, 1-9 grades and best-N-elective aggregates out.
#[derive(Parser, Debug)]
#[command(name = "markbook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the school configuration file (school.toml)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Print the grading scale
    Scale,

    /// Validate and classify a single percentage score
    Grade {
        /// The raw score (0-100)
        score: f64,
    },

    /// Compute term reports for a roster file
    Report {
        /// Path to the roster JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Restrict to a single student id (default: whole class)
        #[arg(short, long)]
        student: Option<u32>,

        /// Term to report on
        #[arg(short, long, default_value = "Term 3")]
        term: String,

        /// Exam type to report on
        #[arg(short = 'e', long, default_value = "End of Term")]
        exam_type: String,
    },

    /// Validate every mark score in a roster file
    Check {
        /// Path to the roster JSON file
        #[arg(short, long)]
        file: PathBuf,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), EngineError> {
    let config = SchoolConfig::load_or_default(cli.config.as_deref())?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Serve { host, port }) => cmd_serve(config, &host, port).await,
        Some(Commands::Scale) => cmd_scale(json_mode),
        Some(Commands::Grade { score }) => cmd_grade(json_mode, score),
        Some(Commands::Report {
            file,
            student,
            term,
            exam_type,
        }) => cmd_report(&config, json_mode, &file, student, &term, &exam_type),
        Some(Commands::Check { file }) => cmd_check(json_mode, &file),
        None => {
            // No subcommand - show the grading scale by default
            cmd_scale(json_mode)
        }
    }
}
