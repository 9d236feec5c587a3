//! Catalog browsing commands: `semesters`, `subjects`, `scale`

use gpa_calc::core::{grade_scale, Catalog};

/// Print every semester with its subject count and credit total
pub fn run_semesters(catalog: &Catalog) {
    println!("{:<10} {:>8} {:>8}", "Semester", "Subjects", "Credits");
    for semester in catalog.semesters() {
        println!(
            "{:<10} {:>8} {:>8}",
            semester,
            catalog.subjects(semester).len(),
            catalog.total_credits(semester)
        );
    }
}

/// Print the subjects of one semester
///
/// # Errors
/// Returns an error if the semester is not in the catalog.
pub fn run_subjects(catalog: &Catalog, semester: &str) -> Result<(), String> {
    if !catalog.contains(semester) {
        return Err(unknown_semester(catalog, semester));
    }
    println!("=== Semester {semester} ===");
    for subject in catalog.subjects(semester) {
        println!(
            "{:<8} {:<46} {:>4}",
            subject.code, subject.name, subject.credits
        );
    }
    println!("Total credits: {}", catalog.total_credits(semester));
    Ok(())
}

/// Print the grade legend
pub fn run_scale() {
    println!("{:<6} {:>6}", "Grade", "Points");
    for (grade, points) in grade_scale() {
        println!("{:<6} {:>6}", grade.symbol(), points);
    }
}

/// Error message naming the semesters that do exist
pub fn unknown_semester(catalog: &Catalog, semester: &str) -> String {
    format!(
        "✗ Unknown semester '{semester}' (available: {})",
        catalog.semesters().join(", ")
    )
}
