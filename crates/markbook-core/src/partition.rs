//! # Subject Partitioner
//!
//! Filters the subject catalog down to a class category and splits the
//! result into core and elective groups.
//!
//! ## Empty-category fallback
//!
//! Historically, a category filter that matched nothing fell back to the
//! entire unfiltered catalog. That guards against category-label mismatches
//! between class and subject records, but it can also silently pull
//! irrelevant subjects into a student's aggregate. The behavior is kept as
//! the default and exposed as an explicit, named policy
//! ([`EmptyCategoryPolicy`]) so callers can opt into stricter handling.

use crate::{EngineConfig, EngineError, Subject};
use serde::{Deserialize, Serialize};

// =============================================================================
// EMPTY-CATEGORY POLICY
// =============================================================================

/// What to do when the category filter matches zero subjects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyCategoryPolicy {
    /// Partition the entire unfiltered catalog instead (compatibility
    /// default; tolerates label mismatches between class and subject
    /// records).
    #[default]
    FallbackAll,
    /// Fail with `EngineError::EmptyCategory`.
    Error,
    /// Return an empty partition.
    Empty,
}

// =============================================================================
// PARTITION
// =============================================================================

/// The core/elective split of a subject catalog for one class category.
///
/// Borrows from the catalog; subject metadata is never copied or mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubjectPartition<'a> {
    /// Mandatory subjects; every grade counts toward the aggregate.
    pub core: Vec<&'a Subject>,
    /// Optional subjects; only the best N grades count.
    pub elective: Vec<&'a Subject>,
}

impl SubjectPartition<'_> {
    /// Total number of subjects in the partition.
    #[must_use]
    pub fn len(&self) -> usize {
        self.core.len() + self.elective.len()
    }

    /// True when neither group contains any subject.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.core.is_empty() && self.elective.is_empty()
    }
}

/// Partition the subject catalog for a class category.
///
/// Subjects are filtered by exact category match, then split into core and
/// elective groups. A subject counts as core when its `subject_type` says
/// so, or when its name matches one of the configured core-subject name
/// patterns (see [`EngineConfig::is_core_subject`]); everything else is
/// elective. Catalog order is preserved within each group, which downstream
/// tie-breaking relies on.
pub fn partition_subjects<'a>(
    subjects: &'a [Subject],
    category: &str,
    config: &EngineConfig,
) -> Result<SubjectPartition<'a>, EngineError> {
    let matching: Vec<&Subject> = subjects
        .iter()
        .filter(|s| s.category == category)
        .collect();

    let pool = if matching.is_empty() {
        match config.on_empty_category {
            EmptyCategoryPolicy::FallbackAll => subjects.iter().collect(),
            EmptyCategoryPolicy::Error => {
                return Err(EngineError::EmptyCategory(category.to_string()));
            }
            EmptyCategoryPolicy::Empty => Vec::new(),
        }
    } else {
        matching
    };

    let mut partition = SubjectPartition::default();
    for subject in pool {
        if config.is_core_subject(subject) {
            partition.core.push(subject);
        } else {
            partition.elective.push(subject);
        }
    }
    Ok(partition)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SubjectType;

    fn subject(id: u32, name: &str, category: &str, subject_type: SubjectType) -> Subject {
        Subject {
            id,
            name: name.to_string(),
            code: format!("SUB{id}"),
            category: category.to_string(),
            subject_type,
        }
    }

    fn catalog() -> Vec<Subject> {
        vec![
            subject(1, "English Language", "JHS", SubjectType::Core),
            subject(2, "Mathematics", "JHS", SubjectType::Core),
            subject(3, "Integrated Science", "JHS", SubjectType::Core),
            subject(4, "Social Studies", "JHS", SubjectType::Core),
            subject(5, "Creative Arts", "JHS", SubjectType::Elective),
            subject(6, "French", "JHS", SubjectType::Elective),
            subject(7, "ICT", "Upper Primary", SubjectType::Elective),
        ]
    }

    #[test]
    fn splits_by_subject_type() {
        let subjects = catalog();
        let partition =
            partition_subjects(&subjects, "JHS", &EngineConfig::default()).expect("partition");
        assert_eq!(partition.core.len(), 4);
        assert_eq!(partition.elective.len(), 2);
        // ICT belongs to a different category and is excluded
        assert!(partition.elective.iter().all(|s| s.id != 7));
    }

    #[test]
    fn preserves_catalog_order() {
        let subjects = catalog();
        let partition =
            partition_subjects(&subjects, "JHS", &EngineConfig::default()).expect("partition");
        let core_ids: Vec<u32> = partition.core.iter().map(|s| s.id).collect();
        assert_eq!(core_ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn empty_category_falls_back_to_full_catalog() {
        let subjects = catalog();
        let partition = partition_subjects(&subjects, "Kindergarten", &EngineConfig::default())
            .expect("partition");
        // Fallback uses the whole catalog, ICT included
        assert_eq!(partition.len(), subjects.len());
    }

    #[test]
    fn empty_category_error_policy() {
        let subjects = catalog();
        let config = EngineConfig {
            on_empty_category: EmptyCategoryPolicy::Error,
            ..EngineConfig::default()
        };
        assert!(matches!(
            partition_subjects(&subjects, "Kindergarten", &config),
            Err(EngineError::EmptyCategory(category)) if category == "Kindergarten"
        ));
    }

    #[test]
    fn empty_category_empty_policy() {
        let subjects = catalog();
        let config = EngineConfig {
            on_empty_category: EmptyCategoryPolicy::Empty,
            ..EngineConfig::default()
        };
        let partition =
            partition_subjects(&subjects, "Kindergarten", &config).expect("partition");
        assert!(partition.is_empty());
    }

    #[test]
    fn category_match_is_exact() {
        let subjects = catalog();
        // "jhs" does not match "JHS"; the fallback kicks in instead of a
        // case-insensitive match, surfacing the label mismatch downstream.
        let partition =
            partition_subjects(&subjects, "jhs", &EngineConfig::default()).expect("partition");
        assert_eq!(partition.len(), subjects.len());
    }

    #[test]
    fn name_pattern_promotes_to_core() {
        let subjects = vec![
            subject(1, "Mathematics", "JHS", SubjectType::Elective),
            subject(2, "French", "JHS", SubjectType::Elective),
        ];
        let config = EngineConfig {
            core_subject_names: ["mathematics".to_string()].into_iter().collect(),
            ..EngineConfig::default()
        };
        let partition = partition_subjects(&subjects, "JHS", &config).expect("partition");
        assert_eq!(partition.core.len(), 1);
        assert_eq!(partition.core[0].id, 1);
        assert_eq!(partition.elective.len(), 1);
    }

    #[test]
    fn policy_deserializes_from_snake_case() {
        let policy: EmptyCategoryPolicy =
            serde_json::from_str("\"fallback_all\"").expect("deserialize");
        assert_eq!(policy, EmptyCategoryPolicy::FallbackAll);
        let policy: EmptyCategoryPolicy = serde_json::from_str("\"error\"").expect("deserialize");
        assert_eq!(policy, EmptyCategoryPolicy::Error);
    }
}
