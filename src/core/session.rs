//! Calculator session state
//!
//! The explicit state object a front end owns: which mode is active, which
//! semester (or set of semesters) is selected, and the grades entered so far.
//! Results are recomputed on every read.

use crate::core::averaging::{cumulative_breakdown, semester_breakdown, GpaSummary};
use crate::core::catalog::Catalog;
use crate::core::export::ExportReport;
use crate::core::models::Grade;
use crate::core::registry::GradeRegistry;
use std::fmt;
use std::str::FromStr;

/// Which figure the session is showing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CalculatorMode {
    /// GPA of a single selected semester
    #[default]
    Semester,
    /// CGPA over a toggled set of semesters
    Overall,
}

impl FromStr for CalculatorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "semester" | "sem" | "gpa" => Ok(Self::Semester),
            "overall" | "cumulative" | "cgpa" => Ok(Self::Overall),
            _ => Err(format!("Unknown mode: {s} (expected semester or overall)")),
        }
    }
}

impl fmt::Display for CalculatorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Semester => write!(f, "semester"),
            Self::Overall => write!(f, "overall"),
        }
    }
}

/// Selection state plus grade registry for one user session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    mode: CalculatorMode,
    selected_semester: Option<String>,
    selected_semesters: Vec<String>,
    registry: GradeRegistry,
}

impl Session {
    /// Create an empty session in semester mode
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Active mode
    #[must_use]
    pub const fn mode(&self) -> CalculatorMode {
        self.mode
    }

    /// Switch mode; selections and grades are kept
    pub fn set_mode(&mut self, mode: CalculatorMode) {
        self.mode = mode;
    }

    /// Semester picked in semester mode
    #[must_use]
    pub fn selected_semester(&self) -> Option<&str> {
        self.selected_semester.as_deref()
    }

    /// Pick the semester shown in semester mode
    pub fn select_semester(&mut self, semester: &str) {
        self.selected_semester = Some(semester.to_string());
    }

    /// Semesters included in overall mode, in the order they were added
    #[must_use]
    pub fn selected_semesters(&self) -> &[String] {
        &self.selected_semesters
    }

    /// Add a semester to the overall set, or remove it if already present
    ///
    /// Returns `true` when the semester is now included.
    pub fn toggle_semester(&mut self, semester: &str) -> bool {
        if let Some(pos) = self.selected_semesters.iter().position(|s| s == semester) {
            self.selected_semesters.remove(pos);
            false
        } else {
            self.selected_semesters.push(semester.to_string());
            true
        }
    }

    /// Grades entered so far
    #[must_use]
    pub const fn registry(&self) -> &GradeRegistry {
        &self.registry
    }

    /// Mutable access to the grades, e.g. to apply a grade sheet
    pub fn registry_mut(&mut self) -> &mut GradeRegistry {
        &mut self.registry
    }

    /// Set or clear one subject's grade
    pub fn update_grade(&mut self, semester: &str, subject_code: &str, grade: Option<Grade>) {
        self.registry.update_grade(semester, subject_code, grade);
    }

    /// Drop all grades and both selections; the mode is kept
    pub fn clear_all(&mut self) {
        self.registry.clear();
        self.selected_semester = None;
        self.selected_semesters.clear();
        crate::debug!("Session cleared");
    }

    /// Totals behind the figure for the current mode
    ///
    /// Semester mode without a selection and overall mode with an empty set
    /// both yield an empty summary.
    #[must_use]
    pub fn breakdown(&self, catalog: &Catalog) -> GpaSummary {
        match self.mode {
            CalculatorMode::Semester => self
                .selected_semester
                .as_deref()
                .map(|s| semester_breakdown(catalog, &self.registry, s))
                .unwrap_or_default(),
            CalculatorMode::Overall => {
                cumulative_breakdown(catalog, &self.registry, &self.selected_semesters)
            }
        }
    }

    /// GPA or CGPA for the current mode
    #[must_use]
    pub fn result(&self, catalog: &Catalog) -> f64 {
        self.breakdown(catalog).gpa()
    }

    /// Export report for the current mode
    ///
    /// `None` in semester mode when no semester has been picked.
    #[must_use]
    pub fn export_report(&self, catalog: &Catalog) -> Option<ExportReport> {
        match self.mode {
            CalculatorMode::Semester => self
                .selected_semester
                .as_deref()
                .map(|s| ExportReport::for_semester(catalog, &self.registry, s)),
            CalculatorMode::Overall => Some(ExportReport::for_semesters(
                catalog,
                &self.registry,
                &self.selected_semesters,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Semester".parse::<CalculatorMode>(), Ok(CalculatorMode::Semester));
        assert_eq!("cgpa".parse::<CalculatorMode>(), Ok(CalculatorMode::Overall));
        assert!("weekly".parse::<CalculatorMode>().is_err());
        assert_eq!(CalculatorMode::Overall.to_string(), "overall");
    }

    #[test]
    fn test_toggle_preserves_insertion_order() {
        let mut session = Session::new();
        assert!(session.toggle_semester("3"));
        assert!(session.toggle_semester("1"));
        assert!(session.toggle_semester("2"));
        assert!(!session.toggle_semester("1"));
        assert_eq!(session.selected_semesters(), ["3", "2"]);
        assert!(session.toggle_semester("1"));
        assert_eq!(session.selected_semesters(), ["3", "2", "1"]);
    }

    #[test]
    fn test_result_without_selection_is_zero() {
        let catalog = Catalog::builtin();
        let mut session = Session::new();
        session.update_grade("1", "CH3124", Some(Grade::O));
        assert!(session.result(catalog).abs() < f64::EPSILON);
        session.set_mode(CalculatorMode::Overall);
        assert!(session.result(catalog).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mode_switch_keeps_state() {
        let catalog = Catalog::builtin();
        let mut session = Session::new();
        session.select_semester("1");
        session.update_grade("1", "CH3124", Some(Grade::A));
        session.set_mode(CalculatorMode::Overall);
        session.toggle_semester("1");
        session.set_mode(CalculatorMode::Semester);

        assert_eq!(session.selected_semester(), Some("1"));
        assert!((session.result(catalog) - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_export_requires_selection_in_semester_mode() {
        let catalog = Catalog::builtin();
        let mut session = Session::new();
        assert!(session.export_report(catalog).is_none());
        session.set_mode(CalculatorMode::Overall);
        assert!(session.export_report(catalog).is_some());
    }
}
