//! Plain-text GPA/CGPA export
//!
//! The exported file always starts with a single summary line, e.g.
//! `[CLASSIFIED] Semester 3 GPA: 8.42` or `[CLASSIFIED] Overall CGPA: 8.42`.
//! The detailed variant appends totals and a per-subject table rendered from an
//! embedded template.

use crate::core::averaging::{cumulative_breakdown, semester_breakdown, subject_results, GpaSummary};
use crate::core::catalog::Catalog;
use crate::core::models::Grade;
use crate::core::registry::GradeRegistry;
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded detailed report template
const REPORT_TEMPLATE: &str = include_str!("templates/report.txt");

/// What a report covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportScope {
    /// One semester's GPA
    Semester(String),
    /// CGPA over the listed semesters
    Overall,
}

impl ReportScope {
    /// Default file name for this scope
    #[must_use]
    pub const fn file_name(&self) -> &'static str {
        match self {
            Self::Semester(_) => "GPA_Report_CLASSIFIED.txt",
            Self::Overall => "CGPA_Report_CLASSIFIED.txt",
        }
    }
}

/// One subject row in a detailed report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    /// Semester the subject belongs to
    pub semester: String,
    /// Subject code
    pub code: String,
    /// Subject title
    pub name: String,
    /// Credit weight
    pub credits: f64,
    /// Grade, `None` when ungraded
    pub grade: Option<Grade>,
}

/// A ready-to-write export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    /// What the report covers
    pub scope: ReportScope,
    /// Semesters folded into the figure, deduplicated
    pub semesters: Vec<String>,
    /// Totals behind the figure
    pub summary: GpaSummary,
    /// Per-subject rows for the detailed variant
    pub rows: Vec<ReportRow>,
}

impl ExportReport {
    /// Report on one semester's GPA
    #[must_use]
    pub fn for_semester(catalog: &Catalog, registry: &GradeRegistry, semester: &str) -> Self {
        Self {
            scope: ReportScope::Semester(semester.to_string()),
            semesters: vec![semester.to_string()],
            summary: semester_breakdown(catalog, registry, semester),
            rows: collect_rows(catalog, registry, &[semester]),
        }
    }

    /// Report on the CGPA across several semesters
    #[must_use]
    pub fn for_semesters<S: AsRef<str>>(
        catalog: &Catalog,
        registry: &GradeRegistry,
        semesters: &[S],
    ) -> Self {
        let mut seen = BTreeSet::new();
        let ordered: Vec<&str> = semesters
            .iter()
            .map(|s| s.as_ref())
            .filter(|s| seen.insert(*s))
            .collect();
        Self {
            scope: ReportScope::Overall,
            semesters: ordered.iter().map(ToString::to_string).collect(),
            summary: cumulative_breakdown(catalog, registry, &ordered),
            rows: collect_rows(catalog, registry, &ordered),
        }
    }

    /// The GPA or CGPA figure
    #[must_use]
    pub fn gpa(&self) -> f64 {
        self.summary.gpa()
    }

    /// The single summary line, always two decimals
    #[must_use]
    pub fn summary_line(&self) -> String {
        summary_line(&self.scope, self.gpa())
    }

    /// Default file name for this report
    #[must_use]
    pub const fn file_name(&self) -> &'static str {
        self.scope.file_name()
    }

    /// Render the file contents
    #[must_use]
    pub fn render(&self, detailed: bool) -> String {
        if !detailed {
            return self.summary_line();
        }

        let scope = match &self.scope {
            ReportScope::Semester(s) => format!("semester {s}"),
            ReportScope::Overall => "overall".to_string(),
        };
        let semesters = if self.semesters.is_empty() {
            "none".to_string()
        } else {
            self.semesters.join(", ")
        };

        let mut output = REPORT_TEMPLATE.to_string();
        output = output.replace("{{summary_line}}", &self.summary_line());
        output = output.replace("{{scope}}", &scope);
        output = output.replace("{{semesters}}", &semesters);
        output = output.replace(
            "{{graded_subjects}}",
            &self.summary.graded_subjects.to_string(),
        );
        output = output.replace("{{credits}}", &format_credits(self.summary.credits));
        output = output.replace(
            "{{quality_points}}",
            &format!("{:.2}", self.summary.quality_points),
        );
        output = output.replace("{{subject_table}}", &self.subject_table());
        output
    }

    fn subject_table(&self) -> String {
        let mut table = String::new();
        let _ = writeln!(
            table,
            "{:<4} {:<8} {:<46} {:>7} {:>5} {:>8}",
            "Sem", "Code", "Subject", "Credits", "Grade", "Points"
        );
        let _ = writeln!(table, "{}", "-".repeat(83));
        for row in &self.rows {
            let (grade, points) = row.grade.map_or_else(
                || ("-".to_string(), "-".to_string()),
                |g| {
                    (
                        g.symbol().to_string(),
                        format!("{:.1}", f64::from(g.points()) * row.credits),
                    )
                },
            );
            let _ = writeln!(
                table,
                "{:<4} {:<8} {:<46} {:>7} {:>5} {:>8}",
                row.semester,
                row.code,
                row.name,
                format_credits(row.credits),
                grade,
                points
            );
        }
        table
    }

    /// Write the report and return the path written
    ///
    /// When `target` is an existing directory the default file name is used
    /// inside it; otherwise `target` is the file path. Parent directories are
    /// created as needed.
    ///
    /// # Errors
    /// Returns an error if a directory cannot be created or the file cannot be written.
    pub fn write_to(&self, target: &Path, detailed: bool) -> io::Result<PathBuf> {
        let path = if target.is_dir() {
            target.join(self.file_name())
        } else {
            target.to_path_buf()
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut content = self.render(detailed);
        if !content.ends_with('\n') {
            content.push('\n');
        }
        fs::write(&path, content)?;
        crate::info!("Wrote report to {}", path.display());
        Ok(path)
    }
}

/// Summary line for an already-computed figure
#[must_use]
pub fn summary_line(scope: &ReportScope, gpa: f64) -> String {
    match scope {
        ReportScope::Semester(s) => format!("[CLASSIFIED] Semester {s} GPA: {gpa:.2}"),
        ReportScope::Overall => format!("[CLASSIFIED] Overall CGPA: {gpa:.2}"),
    }
}

fn collect_rows(catalog: &Catalog, registry: &GradeRegistry, semesters: &[&str]) -> Vec<ReportRow> {
    semesters
        .iter()
        .flat_map(|semester| {
            subject_results(catalog, registry, semester)
                .into_iter()
                .map(move |r| ReportRow {
                    semester: (*semester).to_string(),
                    code: r.subject.code.clone(),
                    name: r.subject.name.clone(),
                    credits: r.subject.credits,
                    grade: r.grade,
                })
        })
        .collect()
}

/// Credits print without a trailing `.0` when whole
fn format_credits(credits: f64) -> String {
    if credits.fract().abs() < f64::EPSILON {
        format!("{credits:.0}")
    } else {
        format!("{credits}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lines() {
        assert_eq!(
            summary_line(&ReportScope::Semester("3".to_string()), 8.4166),
            "[CLASSIFIED] Semester 3 GPA: 8.42"
        );
        assert_eq!(
            summary_line(&ReportScope::Overall, 0.0),
            "[CLASSIFIED] Overall CGPA: 0.00"
        );
    }

    #[test]
    fn test_file_names() {
        assert_eq!(
            ReportScope::Semester("1".to_string()).file_name(),
            "GPA_Report_CLASSIFIED.txt"
        );
        assert_eq!(ReportScope::Overall.file_name(), "CGPA_Report_CLASSIFIED.txt");
    }

    #[test]
    fn test_format_credits() {
        assert_eq!(format_credits(3.0), "3");
        assert_eq!(format_credits(1.5), "1.5");
    }

    #[test]
    fn test_plain_render_is_one_line() {
        let mut registry = GradeRegistry::new();
        registry.update_grade("1", "CH3124", Some(Grade::A));
        let report = ExportReport::for_semester(Catalog::builtin(), &registry, "1");
        assert_eq!(report.render(false), "[CLASSIFIED] Semester 1 GPA: 8.00");
    }

    #[test]
    fn test_detailed_render_lists_subjects() {
        let mut registry = GradeRegistry::new();
        registry.update_grade("3", "CS3364", Some(Grade::APlus));
        let report = ExportReport::for_semesters(Catalog::builtin(), &registry, &["3", "3"]);
        let text = report.render(true);

        assert!(text.starts_with("[CLASSIFIED] Overall CGPA: 9.00\n"));
        assert!(text.contains("Semesters:       3\n"));
        assert!(text.contains("Graded credits:  1.5\n"));
        assert!(text.contains("CS3364"));
        assert!(text.contains("13.5"));
        assert_eq!(report.rows.len(), 9);
    }
}
