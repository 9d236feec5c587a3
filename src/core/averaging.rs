//! Credit-weighted grade point averaging
//!
//! GPA for one semester and CGPA across several are the same fold: for every
//! catalog subject that has a grade, add `points x credits` to the quality
//! points and `credits` to the credit total. Ungraded subjects contribute to
//! neither; `U` and `RA` contribute zero points but still count their credits.
//! An empty credit total yields exactly `0`.
//!
//! All functions here are pure reads of a [`Catalog`] and a [`GradeRegistry`].

use crate::core::catalog::Catalog;
use crate::core::models::{Grade, Subject};
use crate::core::registry::GradeRegistry;
use std::collections::BTreeSet;
use std::ops::AddAssign;

/// Totals accumulated by the averaging fold
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GpaSummary {
    /// Sum of `points x credits` over graded subjects
    pub quality_points: f64,
    /// Sum of credits over graded subjects
    pub credits: f64,
    /// Number of graded subjects
    pub graded_subjects: usize,
}

impl GpaSummary {
    /// Weighted average, or `0` when no credits were graded
    #[must_use]
    pub fn gpa(&self) -> f64 {
        if self.credits > 0.0 {
            self.quality_points / self.credits
        } else {
            0.0
        }
    }

    fn add_subject(&mut self, subject: &Subject, grade: Grade) {
        self.quality_points += subject.quality_points(grade);
        self.credits += subject.credits;
        self.graded_subjects += 1;
    }
}

impl AddAssign for GpaSummary {
    fn add_assign(&mut self, other: Self) {
        self.quality_points += other.quality_points;
        self.credits += other.credits;
        self.graded_subjects += other.graded_subjects;
    }
}

/// One catalog subject paired with the grade the registry holds for it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectResult<'a> {
    /// The catalog subject
    pub subject: &'a Subject,
    /// Its grade, `None` when ungraded
    pub grade: Option<Grade>,
}

impl SubjectResult<'_> {
    /// Quality points earned, `None` when ungraded
    #[must_use]
    pub fn quality_points(&self) -> Option<f64> {
        self.grade.map(|g| self.subject.quality_points(g))
    }
}

/// Every catalog subject of a semester with its current grade, in catalog order
#[must_use]
pub fn subject_results<'a>(
    catalog: &'a Catalog,
    registry: &GradeRegistry,
    semester: &str,
) -> Vec<SubjectResult<'a>> {
    catalog
        .subjects(semester)
        .iter()
        .map(|subject| SubjectResult {
            subject,
            grade: registry.grade_of(semester, &subject.code),
        })
        .collect()
}

/// Fold one semester into a [`GpaSummary`]
///
/// Unknown semesters and registry entries for codes missing from the catalog
/// contribute nothing.
#[must_use]
pub fn semester_breakdown(
    catalog: &Catalog,
    registry: &GradeRegistry,
    semester: &str,
) -> GpaSummary {
    let mut summary = GpaSummary::default();
    for subject in catalog.subjects(semester) {
        if let Some(grade) = registry.grade_of(semester, &subject.code) {
            summary.add_subject(subject, grade);
        }
    }
    summary
}

/// Fold several semesters into one [`GpaSummary`]
///
/// Duplicate keys are counted once and the fold runs in a fixed order, so the
/// result does not depend on how `semesters` is ordered.
#[must_use]
pub fn cumulative_breakdown<S: AsRef<str>>(
    catalog: &Catalog,
    registry: &GradeRegistry,
    semesters: &[S],
) -> GpaSummary {
    let unique: BTreeSet<&str> = semesters.iter().map(|s| s.as_ref()).collect();
    let mut summary = GpaSummary::default();
    for semester in unique {
        summary += semester_breakdown(catalog, registry, semester);
    }
    summary
}

/// GPA for one semester
#[must_use]
pub fn semester_gpa(catalog: &Catalog, registry: &GradeRegistry, semester: &str) -> f64 {
    semester_breakdown(catalog, registry, semester).gpa()
}

/// CGPA across a set of semesters
#[must_use]
pub fn cumulative_gpa<S: AsRef<str>>(
    catalog: &Catalog,
    registry: &GradeRegistry,
    semesters: &[S],
) -> f64 {
    cumulative_breakdown(catalog, registry, semesters).gpa()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_ungraded_semester_is_zero() {
        let registry = GradeRegistry::new();
        let gpa = semester_gpa(Catalog::builtin(), &registry, "1");
        assert!(gpa == 0.0 && !gpa.is_nan());
    }

    #[test]
    fn test_single_subject_weighted() {
        let mut registry = GradeRegistry::new();
        registry.update_grade("1", "CH3124", Some(Grade::A));
        assert!(approx(semester_gpa(Catalog::builtin(), &registry, "1"), 8.0));
    }

    #[test]
    fn test_failing_grade_counts_credits() {
        let catalog = Catalog::builtin();
        let mut registry = GradeRegistry::new();
        registry.update_grade("1", "MA3122", Some(Grade::O));
        registry.update_grade("1", "GE3111", Some(Grade::U));

        let summary = semester_breakdown(catalog, &registry, "1");
        assert!(approx(summary.credits, 5.0));
        assert!(approx(summary.quality_points, 40.0));
        assert_eq!(summary.graded_subjects, 2);
        assert!(approx(summary.gpa(), 8.0));
    }

    #[test]
    fn test_zero_credit_subject_is_noop() {
        let catalog = Catalog::from_semesters(vec![(
            "1".to_string(),
            vec![
                Subject::new("SEM000", "Seminar", 0.0),
                Subject::new("MA101", "Calculus", 4.0),
            ],
        )])
        .expect("valid");
        let mut registry = GradeRegistry::new();
        registry.update_grade("1", "SEM000", Some(Grade::O));
        assert!(approx(semester_gpa(&catalog, &registry, "1"), 0.0));

        registry.update_grade("1", "MA101", Some(Grade::B));
        assert!(approx(semester_gpa(&catalog, &registry, "1"), 6.0));
    }

    #[test]
    fn test_cumulative_deduplicates() {
        let catalog = Catalog::builtin();
        let mut registry = GradeRegistry::new();
        registry.update_grade("1", "CH3124", Some(Grade::O));
        registry.update_grade("2", "MA3222", Some(Grade::B));

        let once = cumulative_breakdown(catalog, &registry, &["1", "2"]);
        let doubled = cumulative_breakdown(catalog, &registry, &["2", "1", "2", "1"]);
        assert_eq!(once, doubled);
        assert!(approx(once.credits, 7.0));
    }

    #[test]
    fn test_subject_results_follow_catalog() {
        let catalog = Catalog::builtin();
        let mut registry = GradeRegistry::new();
        registry.update_grade("3", "CS3364", Some(Grade::APlus));

        let rows = subject_results(catalog, &registry, "3");
        assert_eq!(rows.len(), 9);
        let lab = rows
            .iter()
            .find(|r| r.subject.code == "CS3364")
            .expect("lab row");
        assert_eq!(lab.grade, Some(Grade::APlus));
        assert!(approx(lab.quality_points().unwrap_or_default(), 13.5));
        assert!(rows[0].quality_points().is_none());
    }
}
