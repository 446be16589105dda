//! # School Configuration
//!
//! Loads the optional `school.toml` file and maps it onto the engine's
//! [`EngineConfig`]. A missing file means defaults; a present but malformed
//! file is an error (no silent fallback over broken configuration).
//!
//! ```toml
//! [school]
//! name = "Sunrise Basic School"
//!
//! [grading]
//! elective_select_count = 2
//! core_subject_names = ["english", "mathematics", "integrated science"]
//! on_empty_category = "fallback_all"
//! ```

use markbook_core::{DEFAULT_ELECTIVE_SELECT_COUNT, EmptyCategoryPolicy, EngineConfig, EngineError};
use serde::Deserialize;
use std::path::Path;

// =============================================================================
// CONFIG FILE STRUCTURE
// =============================================================================

/// Root of the `school.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SchoolConfig {
    pub school: SchoolSection,
    pub grading: GradingSection,
}

/// `[school]` section: identity only, informational.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SchoolSection {
    pub name: String,
}

/// `[grading]` section: the knobs the engine takes as configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GradingSection {
    /// How many elective grades count toward the aggregate.
    pub elective_select_count: usize,
    /// Name patterns that classify a subject as core regardless of its
    /// recorded `subject_type`.
    pub core_subject_names: Vec<String>,
    /// Policy when the category filter matches no subjects.
    pub on_empty_category: EmptyCategoryPolicy,
}

impl Default for GradingSection {
    fn default() -> Self {
        Self {
            elective_select_count: DEFAULT_ELECTIVE_SELECT_COUNT,
            core_subject_names: Vec::new(),
            on_empty_category: EmptyCategoryPolicy::default(),
        }
    }
}

// =============================================================================
// LOADING
// =============================================================================

impl SchoolConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            EngineError::Io(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        toml::from_str(&text).map_err(|e| {
            EngineError::Serialization(format!("Invalid config '{}': {}", path.display(), e))
        })
    }

    /// Load from the given path, or fall back to defaults when no path was
    /// supplied.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, EngineError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Map the file contents onto the engine configuration.
    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            core_subject_names: self.grading.core_subject_names.iter().cloned().collect(),
            elective_select_count: self.grading.elective_select_count,
            on_empty_category: self.grading.on_empty_category,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
