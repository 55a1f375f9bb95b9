//! Project domain model.
//!
//! # Responsibility
//! - Define the project root record and its writable attributes.
//! - Validate attributes before they reach storage.
//!
//! # Invariants
//! - `project_id` is `None` until storage assigns one, then never changes.
//! - `project_name` is non-blank.
//! - `difficulty` is within `1..=5` when present.
//! - Hours are never negative and never exceed the `DECIMAL(7, 2)` column
//!   range.

use super::category::Category;
use super::decimal::Decimal;
use super::material::Material;
use super::step::Step;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned project identifier.
pub type ProjectId = i64;

pub const MIN_DIFFICULTY: i32 = 1;
pub const MAX_DIFFICULTY: i32 = 5;
/// Largest value the `DECIMAL(7, 2)` hour columns hold.
pub const MAX_HOURS: Decimal = Decimal::from_hundredths(9_999_999);

/// Validation failures for project writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    EmptyName,
    DifficultyOutOfRange(i32),
    NegativeHours {
        field: &'static str,
        value: Decimal,
    },
    HoursTooLarge {
        field: &'static str,
        value: Decimal,
    },
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "project name must not be empty"),
            Self::DifficultyOutOfRange(value) => write!(
                f,
                "difficulty ({value}) must be between {MIN_DIFFICULTY} and {MAX_DIFFICULTY}"
            ),
            Self::NegativeHours { field, value } => {
                write!(f, "{field} ({value}) must not be negative")
            }
            Self::HoursTooLarge { field, value } => {
                write!(f, "{field} ({value}) must not exceed {MAX_HOURS}")
            }
        }
    }
}

impl Error for ProjectValidationError {}

/// A do-it-yourself project with its dependent records.
///
/// `materials`, `steps` and `categories` are filled only when the project is
/// loaded by id; list reads leave them empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: Option<ProjectId>,
    pub project_name: String,
    pub estimated_hours: Option<Decimal>,
    pub actual_hours: Option<Decimal>,
    pub difficulty: Option<i32>,
    pub notes: Option<String>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Project {
    /// Creates a transient project with only a name set.
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_id: None,
            project_name: project_name.into(),
            estimated_hours: None,
            actual_hours: None,
            difficulty: None,
            notes: None,
            materials: Vec::new(),
            steps: Vec::new(),
            categories: Vec::new(),
        }
    }

    /// Validates writable attributes.
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.project_name.trim().is_empty() {
            return Err(ProjectValidationError::EmptyName);
        }

        if let Some(difficulty) = self.difficulty {
            if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
                return Err(ProjectValidationError::DifficultyOutOfRange(difficulty));
            }
        }

        for (field, hours) in [
            ("estimated_hours", self.estimated_hours),
            ("actual_hours", self.actual_hours),
        ] {
            match hours {
                Some(value) if value.is_negative() => {
                    return Err(ProjectValidationError::NegativeHours { field, value });
                }
                Some(value) if value > MAX_HOURS => {
                    return Err(ProjectValidationError::HoursTooLarge { field, value });
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Returns whether both projects carry the same writable attributes.
    ///
    /// Identity and child collections are ignored.
    pub fn same_details(&self, other: &Project) -> bool {
        self.project_name == other.project_name
            && self.estimated_hours == other.estimated_hours
            && self.actual_hours == other.actual_hours
            && self.difficulty == other.difficulty
            && self.notes == other.notes
    }
}

impl Display for Project {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.project_id {
            Some(id) => write!(f, "{id}: {}", self.project_name),
            None => write!(f, "(unsaved): {}", self.project_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Project, ProjectValidationError, MAX_HOURS};
    use crate::model::decimal::Decimal;

    #[test]
    fn new_project_is_transient_with_empty_children() {
        let project = Project::new("Deck");
        assert_eq!(project.project_id, None);
        assert!(project.materials.is_empty());
        assert!(project.steps.is_empty());
        assert!(project.categories.is_empty());
        assert_eq!(project.to_string(), "(unsaved): Deck");
    }

    #[test]
    fn validate_rejects_blank_name() {
        assert_eq!(
            Project::new("   ").validate(),
            Err(ProjectValidationError::EmptyName)
        );
    }

    #[test]
    fn validate_bounds_difficulty() {
        let mut project = Project::new("Shed");
        project.difficulty = Some(5);
        assert!(project.validate().is_ok());

        project.difficulty = Some(0);
        assert_eq!(
            project.validate(),
            Err(ProjectValidationError::DifficultyOutOfRange(0))
        );
    }

    #[test]
    fn validate_rejects_negative_hours() {
        let mut project = Project::new("Shed");
        project.actual_hours = Some(Decimal::from_hundredths(-100));
        assert_eq!(
            project.validate(),
            Err(ProjectValidationError::NegativeHours {
                field: "actual_hours",
                value: Decimal::from_hundredths(-100),
            })
        );
    }

    #[test]
    fn validate_caps_hours_at_column_precision() {
        let mut project = Project::new("Barn");
        project.estimated_hours = Some(MAX_HOURS);
        assert!(project.validate().is_ok());

        project.estimated_hours = Some(Decimal::from_hundredths(10_000_000));
        let err = project.validate().unwrap_err();
        assert_eq!(
            err,
            ProjectValidationError::HoursTooLarge {
                field: "estimated_hours",
                value: Decimal::from_hundredths(10_000_000),
            }
        );
        assert_eq!(
            err.to_string(),
            "estimated_hours (100000.00) must not exceed 99999.99"
        );
    }

    #[test]
    fn serialization_renders_hours_with_scale() {
        let mut project = Project::new("Deck");
        project.project_id = Some(7);
        project.estimated_hours = Some(Decimal::from_hundredths(1250));

        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["project_id"], 7);
        assert_eq!(json["estimated_hours"], "12.50");
        assert!(json["actual_hours"].is_null());

        let decoded: Project = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, project);
    }
}
