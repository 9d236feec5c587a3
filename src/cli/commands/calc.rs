//! GPA / CGPA command handlers

use super::catalog::unknown_semester;
use gpa_calc::config::Config;
use gpa_calc::core::averaging::{subject_results, GpaSummary};
use gpa_calc::core::{Catalog, ExportReport, Grade, GradeRegistry};
use gpa_calc::{debug, info, verbose, warn};
use std::path::{Path, PathBuf};

/// One parsed `--grade` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Semester key
    pub semester: String,
    /// Subject code
    pub code: String,
    /// Grade, `None` to clear
    pub grade: Option<Grade>,
}

/// Parse `CODE=GRADE` or `SEM:CODE=GRADE`
///
/// `default_semester` is used when no `SEM:` prefix is given.
///
/// # Errors
/// Returns an error for a missing `=`, missing semester, empty code, or unknown grade.
pub fn parse_assignment(text: &str, default_semester: Option<&str>) -> Result<Assignment, String> {
    let (target, grade) = text
        .split_once('=')
        .ok_or_else(|| format!("✗ Invalid grade assignment '{text}' (expected CODE=GRADE)"))?;

    let (semester, code) = match target.split_once(':') {
        Some((semester, code)) => (semester.trim(), code.trim()),
        None => {
            let semester = default_semester.ok_or_else(|| {
                format!("✗ Grade assignment '{text}' needs a semester (expected SEM:CODE=GRADE)")
            })?;
            (semester, target.trim())
        }
    };
    if semester.is_empty() || code.is_empty() {
        return Err(format!("✗ Invalid grade assignment '{text}'"));
    }

    let grade = Grade::parse_optional(grade).map_err(|e| format!("✗ {e}"))?;
    Ok(Assignment {
        semester: semester.to_string(),
        code: code.to_string(),
        grade,
    })
}

/// Build a registry from an optional grade sheet plus inline assignments
///
/// Inline assignments are applied after the sheet, so they win. Codes the
/// catalog does not know are stored but reported with a warning.
///
/// # Errors
/// Returns an error if the grade sheet or an assignment is invalid.
pub fn build_registry(
    catalog: &Catalog,
    grades_file: Option<&Path>,
    assignments: &[String],
    default_semester: Option<&str>,
) -> Result<GradeRegistry, String> {
    let mut registry = GradeRegistry::new();

    if let Some(path) = grades_file {
        registry
            .apply_grade_sheet_file(path)
            .map_err(|e| format!("✗ {e}"))?;
        info!("Grade sheet loaded: {}", path.display());
    }

    for text in assignments {
        let assignment = parse_assignment(text, default_semester)?;
        if catalog
            .find_subject(&assignment.semester, &assignment.code)
            .is_none()
        {
            warn!(
                "{} is not offered in semester {}; it will not affect the result",
                assignment.code, assignment.semester
            );
        }
        registry.update_grade(&assignment.semester, &assignment.code, assignment.grade);
    }

    Ok(registry)
}

/// Options shared by `gpa` and `cgpa`
pub struct CalcOptions<'a> {
    /// Inline `--grade` values
    pub assignments: &'a [String],
    /// Optional `--grades` sheet
    pub grades_file: Option<&'a Path>,
    /// `--export` target: `Some(None)` means the configured reports directory
    pub export: Option<Option<&'a Path>>,
    /// Show and export the per-subject table
    pub detailed: bool,
}

/// Run `gpa SEMESTER`
///
/// # Errors
/// Returns an error if inputs are invalid or the export cannot be written.
pub fn run_gpa(
    catalog: &Catalog,
    config: &Config,
    semester: &str,
    options: &CalcOptions<'_>,
) -> Result<(), String> {
    if !catalog.contains(semester) {
        warn!("{}", unknown_semester(catalog, semester));
    }
    let registry = build_registry(
        catalog,
        options.grades_file,
        options.assignments,
        Some(semester),
    )?;

    let report = ExportReport::for_semester(catalog, &registry, semester);
    print_result(
        &format!("Semester {semester} GPA"),
        &report.summary,
        catalog.total_credits(semester),
        config.display.precision,
    );
    if options.detailed || gpa_calc::logger::is_verbose_enabled() {
        print_subjects(catalog, &registry, &[semester]);
    }

    export_if_requested(&report, config, options)
}

/// Run `cgpa SEMESTERS...`
///
/// # Errors
/// Returns an error if inputs are invalid or the export cannot be written.
pub fn run_cgpa(
    catalog: &Catalog,
    config: &Config,
    semesters: &[String],
    options: &CalcOptions<'_>,
) -> Result<(), String> {
    for semester in semesters {
        if !catalog.contains(semester) {
            warn!("{}", unknown_semester(catalog, semester));
        }
    }
    let registry = build_registry(catalog, options.grades_file, options.assignments, None)?;

    let report = ExportReport::for_semesters(catalog, &registry, semesters);
    let offered: f64 = report
        .semesters
        .iter()
        .map(|s| catalog.total_credits(s))
        .sum();
    print_result(
        "Overall CGPA",
        &report.summary,
        offered,
        config.display.precision,
    );
    if options.detailed || gpa_calc::logger::is_verbose_enabled() {
        let keys: Vec<&str> = report.semesters.iter().map(String::as_str).collect();
        print_subjects(catalog, &registry, &keys);
    }

    export_if_requested(&report, config, options)
}

fn print_result(label: &str, summary: &GpaSummary, offered_credits: f64, precision: usize) {
    println!(
        "{label}: {:.precision$}  ({} of {} credits graded, {} subjects)",
        summary.gpa(),
        summary.credits,
        offered_credits,
        summary.graded_subjects
    );
}

fn print_subjects(catalog: &Catalog, registry: &GradeRegistry, semesters: &[&str]) {
    for semester in semesters {
        println!("\n--- Semester {semester} ---");
        for row in subject_results(catalog, registry, semester) {
            println!(
                "{:<8} {:<46} {:>4} {:>3}",
                row.subject.code,
                row.subject.name,
                row.subject.credits,
                row.grade.map_or("-", Grade::symbol)
            );
        }
    }
}

fn export_if_requested(
    report: &ExportReport,
    config: &Config,
    options: &CalcOptions<'_>,
) -> Result<(), String> {
    let Some(target) = options.export else {
        return Ok(());
    };
    let path: PathBuf = target.map_or_else(
        || Path::new(&config.paths.reports_dir).join(report.file_name()),
        Path::to_path_buf,
    );
    debug!("Exporting report to {}", path.display());

    let written = report
        .write_to(&path, options.detailed)
        .map_err(|e| format!("✗ Failed to write report to {}: {e}", path.display()))?;
    println!("✓ Report written: {}", written.display());
    verbose!("{}", report.summary_line());
    Ok(())
}
