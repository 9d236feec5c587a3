//! Grade registry
//!
//! Holds the grades a user has picked, per semester. Entries are kept in the
//! order they were first set, at most one per subject code.

use crate::core::models::{Grade, GradeEntry};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Mutable mapping from semester key to the grades chosen for it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeRegistry {
    semesters: BTreeMap<String, Vec<GradeEntry>>,
}

impl GradeRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear the grade for one subject
    ///
    /// Replaces the existing entry for `subject_code` in place, or appends a new
    /// one. `None` clears the grade but keeps the entry. Codes are not checked
    /// against any catalog.
    pub fn update_grade(&mut self, semester: &str, subject_code: &str, grade: Option<Grade>) {
        let entries = self.semesters.entry(semester.to_string()).or_default();
        if let Some(entry) = entries.iter_mut().find(|e| e.subject_code == subject_code) {
            entry.grade = grade;
        } else {
            entries.push(GradeEntry::new(subject_code, grade));
        }
        crate::debug!(
            "Semester {semester}: {subject_code} = {}",
            grade.map_or("-", Grade::symbol)
        );
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.semesters.clear();
    }

    /// Entries recorded for a semester; empty for unknown keys
    #[must_use]
    pub fn entries(&self, semester: &str) -> &[GradeEntry] {
        self.semesters
            .get(semester)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The grade currently chosen for a subject, `None` when absent or cleared
    #[must_use]
    pub fn grade_of(&self, semester: &str, subject_code: &str) -> Option<Grade> {
        self.entries(semester)
            .iter()
            .find(|e| e.subject_code == subject_code)
            .and_then(|e| e.grade)
    }

    /// Semesters that have at least one entry
    pub fn semesters(&self) -> impl Iterator<Item = &str> {
        self.semesters.keys().map(String::as_str)
    }

    /// Whether no entries have been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.semesters.values().all(Vec::is_empty)
    }

    /// Apply a grade sheet in TOML form
    ///
    /// Each table is a semester, each key a subject code, each value a grade
    /// symbol (empty string clears):
    ///
    /// ```toml
    /// [1]
    /// CH3124 = "O"
    /// EN3111 = "B+"
    /// ```
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed or contains an unknown grade.
    /// The registry is left untouched on error.
    pub fn apply_grade_sheet(&mut self, toml_str: &str) -> Result<(), String> {
        let sheet: BTreeMap<String, BTreeMap<String, String>> =
            toml::from_str(toml_str).map_err(|e| format!("Invalid grade sheet: {e}"))?;

        let mut parsed = Vec::new();
        for (semester, grades) in &sheet {
            for (code, symbol) in grades {
                let grade = Grade::parse_optional(symbol)
                    .map_err(|e| format!("Semester {semester}, {code}: {e}"))?;
                parsed.push((semester.as_str(), code.as_str(), grade));
            }
        }

        for (semester, code, grade) in parsed {
            self.update_grade(semester, code, grade);
        }
        Ok(())
    }

    /// Read a grade sheet file and apply it
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn apply_grade_sheet_file(&mut self, path: &Path) -> Result<(), String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read grade sheet {}: {e}", path.display()))?;
        self.apply_grade_sheet(&content)
    }
}
