//! # Roster Documents
//!
//! The JSON input format the CLI and the `/report` endpoint consume: one
//! class with its subject catalog, students and raw marks. The document is
//! exactly the set of plain records the engine's external collaborators
//! (storage, import jobs) are expected to hand over.

use markbook_core::{EngineError, Mark, SchoolClass, Student, Subject};
use serde::{Deserialize, Serialize};
use std::path::Path;

// =============================================================================
// FILE SIZE LIMIT
// =============================================================================

/// Maximum roster file size (50 MB).
///
/// This prevents memory exhaustion from malicious or accidental large files.
pub const MAX_ROSTER_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), EngineError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| EngineError::Io(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(EngineError::Serialization(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

// =============================================================================
// ROSTER
// =============================================================================

/// One class worth of input data for the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub class: SchoolClass,
    pub subjects: Vec<Subject>,
    pub students: Vec<Student>,
    pub marks: Vec<Mark>,
}

impl Roster {
    /// Load a roster document from a JSON file.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        validate_file_size(path, MAX_ROSTER_FILE_SIZE)?;
        let text = std::fs::read_to_string(path).map_err(|e| {
            EngineError::Io(format!("Cannot read roster '{}': {}", path.display(), e))
        })?;
        serde_json::from_str(&text).map_err(|e| {
            EngineError::Serialization(format!("Invalid roster '{}': {}", path.display(), e))
        })
    }

    /// Look up a student by id.
    #[must_use]
    pub fn student(&self, id: u32) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "class": { "id": 1, "name": "JHS 2", "category": "JHS" },
        "subjects": [
            { "id": 1, "name": "Mathematics", "code": "MATH", "category": "JHS", "subject_type": "core" },
            { "id": 2, "name": "French", "code": "FRE", "category": "JHS", "subject_type": "elective" }
        ],
        "students": [
            { "id": 1, "first_name": "Ama", "last_name": "Mensah", "class_id": 1 }
        ],
        "marks": [
            { "student_id": 1, "subject_id": 1, "term": "Term 3", "exam_type": "End of Term", "score": 81.5 }
        ]
    }"#;

    #[test]
    fn loads_sample_roster() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(SAMPLE.as_bytes()).expect("write");

        let roster = Roster::load(file.path()).expect("load");
        assert_eq!(roster.class.category, "JHS");
        assert_eq!(roster.subjects.len(), 2);
        assert_eq!(roster.student(1).expect("student").first_name, "Ama");
        assert_eq!(roster.marks[0].score, 81.5);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = Roster::load(Path::new("/nonexistent/roster.json"));
        assert!(matches!(result, Err(EngineError::Io(_))));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"{ not json").expect("write");

        let result = Roster::load(file.path());
        assert!(matches!(result, Err(EngineError::Serialization(_))));
    }
}
