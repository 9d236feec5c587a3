//! Interactive session
//!
//! A line-oriented front end over [`Session`]: each input line is one command,
//! handled synchronously against in-memory state. Nothing is persisted.

use super::catalog::unknown_semester;
use gpa_calc::config::Config;
use gpa_calc::core::averaging::subject_results;
use gpa_calc::core::{CalculatorMode, Catalog, Grade, Session};
use gpa_calc::{debug, error};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

const HELP: &str = "\
Commands:
  mode [semester|overall]     show or switch the calculator mode
  select SEM                  pick the semester for semester mode
  toggle SEM                  add/remove a semester for overall mode
  subjects [SEM]              list subjects with their current grades
  grade [SEM] CODE GRADE      set a grade (use - to clear); SEM defaults to the selected one
  load FILE                   apply a TOML grade sheet
  show                        print the GPA / CGPA for the current mode
  export [PATH] [--detailed]  write the plain-text report
  clear                       drop all grades and selections
  help                        show this help
  quit                        leave the session";

/// What the loop should do after a command
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    /// Print the text and keep reading
    Continue(String),
    /// Leave the session
    Quit,
}

/// Run the session over stdin until EOF or `quit`
///
/// # Errors
/// Returns an error if stdin cannot be read.
pub fn run(catalog: &Catalog, config: &Config) -> Result<(), String> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    if interactive {
        println!("gpacalc interactive session. Type 'help' for commands.");
    }
    drive(stdin.lock(), interactive, catalog, config)
}

/// Feed `input` line by line into a fresh session
///
/// Interactive sessions log a failed command and keep going; otherwise the
/// first error ends the session and is returned to the caller, unlogged.
fn drive(
    input: impl BufRead,
    interactive: bool,
    catalog: &Catalog,
    config: &Config,
) -> Result<(), String> {
    let mut session = Session::new();
    let mut lines = input.lines();
    loop {
        if interactive {
            print!("[{}]> ", session.mode());
            io::stdout().flush().ok();
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.map_err(|e| format!("✗ Failed to read input: {e}"))?;

        match execute(&line, &mut session, catalog, config) {
            Ok(Reply::Continue(text)) => {
                if !text.is_empty() {
                    println!("{text}");
                }
            }
            Ok(Reply::Quit) => break,
            Err(e) if interactive => error!("{e}"),
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Execute one command line against the session
///
/// # Errors
/// Returns a user-facing message when the command is unknown or invalid.
pub fn execute(
    line: &str,
    session: &mut Session,
    catalog: &Catalog,
    config: &Config,
) -> Result<Reply, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&command, args)) = tokens.split_first() else {
        return Ok(Reply::Continue(String::new()));
    };
    debug!("shell: {line}");

    let text = match (command.to_ascii_lowercase().as_str(), args) {
        ("help" | "?", _) => HELP.to_string(),
        ("quit" | "exit", _) => return Ok(Reply::Quit),
        ("mode", []) => format!("Mode: {}", session.mode()),
        ("mode", [mode]) => {
            session.set_mode(mode.parse()?);
            format!("Mode: {}", session.mode())
        }
        ("select", [semester]) => {
            require_semester(catalog, semester)?;
            session.select_semester(semester);
            format!("Selected semester {semester}")
        }
        ("toggle", [semester]) => {
            require_semester(catalog, semester)?;
            let state = if session.toggle_semester(semester) {
                "included"
            } else {
                "removed"
            };
            format!(
                "Semester {semester} {state} (selected: {})",
                list_or_none(session.selected_semesters())
            )
        }
        ("subjects", []) => {
            let semester = current_semester(session)?;
            subjects_table(session, catalog, &semester)
        }
        ("subjects", [semester]) => {
            require_semester(catalog, semester)?;
            subjects_table(session, catalog, semester)
        }
        ("grade", [code, grade]) => {
            let semester = current_semester(session)?;
            set_grade(session, catalog, &semester, code, grade)?
        }
        ("grade", [semester, code, grade]) => set_grade(session, catalog, semester, code, grade)?,
        ("load", [path]) => {
            session
                .registry_mut()
                .apply_grade_sheet_file(Path::new(path))?;
            format!("Loaded grade sheet {path}")
        }
        ("show", []) => show(session, catalog, config.display.precision),
        ("export", rest) => export(session, catalog, config, rest)?,
        ("clear", []) => {
            session.clear_all();
            "Cleared all grades and selections".to_string()
        }
        _ => return Err(format!("Unknown or malformed command: '{line}' (try 'help')")),
    };
    Ok(Reply::Continue(text))
}

fn require_semester(catalog: &Catalog, semester: &str) -> Result<(), String> {
    if catalog.contains(semester) {
        Ok(())
    } else {
        Err(unknown_semester(catalog, semester))
    }
}

fn current_semester(session: &Session) -> Result<String, String> {
    session
        .selected_semester()
        .map(ToString::to_string)
        .ok_or_else(|| "No semester selected; use 'select SEM' or pass SEM explicitly".to_string())
}

fn list_or_none(semesters: &[String]) -> String {
    if semesters.is_empty() {
        "none".to_string()
    } else {
        semesters.join(", ")
    }
}

fn set_grade(
    session: &mut Session,
    catalog: &Catalog,
    semester: &str,
    code: &str,
    grade: &str,
) -> Result<String, String> {
    let grade = Grade::parse_optional(grade)?;
    session.update_grade(semester, code, grade);

    let shown = grade.map_or("-", Grade::symbol);
    if catalog.find_subject(semester, code).is_none() {
        Ok(format!(
            "{code} = {shown} (not offered in semester {semester}; ignored by averages)"
        ))
    } else {
        Ok(format!("{code} = {shown}"))
    }
}

fn subjects_table(session: &Session, catalog: &Catalog, semester: &str) -> String {
    let mut lines = vec![format!("=== Semester {semester} ===")];
    lines.extend(
        subject_results(catalog, session.registry(), semester)
            .iter()
            .map(|row| {
                format!(
                    "{:<8} {:<46} {:>4} {:>3}",
                    row.subject.code,
                    row.subject.name,
                    row.subject.credits,
                    row.grade.map_or("-", Grade::symbol)
                )
            }),
    );
    lines.join("\n")
}

fn show(session: &Session, catalog: &Catalog, precision: usize) -> String {
    let summary = session.breakdown(catalog);
    let label = match session.mode() {
        CalculatorMode::Semester => format!(
            "Semester {} GPA",
            session.selected_semester().unwrap_or("-")
        ),
        CalculatorMode::Overall => format!(
            "Overall CGPA [{}]",
            list_or_none(session.selected_semesters())
        ),
    };
    format!(
        "{label}: {:.precision$}  ({} credits graded, {} subjects)",
        summary.gpa(),
        summary.credits,
        summary.graded_subjects
    )
}

fn export(
    session: &Session,
    catalog: &Catalog,
    config: &Config,
    args: &[&str],
) -> Result<String, String> {
    let detailed = args.contains(&"--detailed");
    let paths: Vec<&&str> = args.iter().filter(|a| **a != "--detailed").collect();
    if paths.len() > 1 {
        return Err("Usage: export [PATH] [--detailed]".to_string());
    }

    let report = session
        .export_report(catalog)
        .ok_or_else(|| "Nothing to export: select a semester first".to_string())?;
    let path = paths.first().map_or_else(
        || Path::new(&config.paths.reports_dir).join(report.file_name()),
        |p| PathBuf::from(**p),
    );
    let written = report
        .write_to(&path, detailed)
        .map_err(|e| format!("Failed to write report to {}: {e}", path.display()))?;
    Ok(format!(
        "✓ Report written: {} ({})",
        written.display(),
        report.summary_line()
    ))
}
