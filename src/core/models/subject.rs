//! Subject and grade entry models

use super::Grade;
use serde::{Deserialize, Serialize};

/// A subject in a semester's curriculum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Subject code, unique within its semester (e.g., "CH3124")
    pub code: String,

    /// Subject title (e.g., "Engineering Chemistry")
    pub name: String,

    /// Credit weight (can be fractional, e.g. 1.5 for labs)
    pub credits: f64,
}

impl Subject {
    /// Create a new subject
    ///
    /// # Arguments
    /// * `code` - Subject code
    /// * `name` - Subject title
    /// * `credits` - Credit weight
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, credits: f64) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            credits,
        }
    }

    /// Quality points earned with `grade` (points x credits)
    #[must_use]
    pub fn quality_points(&self, grade: Grade) -> f64 {
        f64::from(grade.points()) * self.credits
    }
}

/// The user's current choice for one subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeEntry {
    /// Code of the subject this entry grades
    pub subject_code: String,

    /// Chosen grade, `None` when cleared
    pub grade: Option<Grade>,
}

impl GradeEntry {
    /// Create a new grade entry
    #[must_use]
    pub fn new(subject_code: impl Into<String>, grade: Option<Grade>) -> Self {
        Self {
            subject_code: subject_code.into(),
            grade,
        }
    }
}
