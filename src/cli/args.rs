//! CLI argument definitions for `gpa-calc`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use gpa_calc::config::ConfigOverrides;
use gpa_calc::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self))
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `reports_dir`, `precision`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// List the semesters in the catalog.
    Semesters,
    /// List the subjects taught in a semester.
    Subjects {
        /// Semester key (e.g., 1)
        #[arg(value_name = "SEMESTER")]
        semester: String,
    },
    /// Show the grade legend.
    Scale,
    /// Compute the GPA of one semester.
    Gpa {
        /// Semester key (e.g., 1)
        #[arg(value_name = "SEMESTER")]
        semester: String,

        /// Grade assignment as CODE=GRADE (repeatable); an empty GRADE clears it
        #[arg(short, long = "grade", value_name = "CODE=GRADE")]
        grades: Vec<String>,

        /// TOML grade sheet to load before applying --grade values
        #[arg(long = "grades", value_name = "FILE")]
        grades_file: Option<PathBuf>,

        /// Write a plain-text report (to --export=PATH, or the configured reports directory)
        #[arg(long, value_name = "PATH", num_args = 0..=1, require_equals = true)]
        export: Option<Option<PathBuf>>,

        /// Include the per-subject table in output and exports
        #[arg(long)]
        detailed: bool,
    },
    /// Compute the CGPA across several semesters.
    Cgpa {
        /// Semester keys to include (duplicates are counted once)
        #[arg(value_name = "SEMESTERS", num_args = 1..)]
        semesters: Vec<String>,

        /// Grade assignment as SEM:CODE=GRADE (repeatable); an empty GRADE clears it
        #[arg(short, long = "grade", value_name = "SEM:CODE=GRADE")]
        grades: Vec<String>,

        /// TOML grade sheet to load before applying --grade values
        #[arg(long = "grades", value_name = "FILE")]
        grades_file: Option<PathBuf>,

        /// Write a plain-text report (to --export=PATH, or the configured reports directory)
        #[arg(long, value_name = "PATH", num_args = 0..=1, require_equals = true)]
        export: Option<Option<PathBuf>>,

        /// Include the per-subject table in output and exports
        #[arg(long)]
        detailed: bool,
    },
    /// Start an interactive session reading commands from stdin.
    Shell,
}

#[derive(Parser, Debug)]
#[command(
    name = "gpacalc",
    about = "Credit-weighted GPA / CGPA calculator",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Use a catalog TOML file instead of the built-in curriculum
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Override config reports directory
    #[arg(long = "config-reports-dir", value_name = "DIR")]
    pub config_reports_dir: Option<PathBuf>,

    /// Override config reports directory (short form)
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Decimal places for displayed figures
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u8).range(0..=10))]
    pub precision: Option<u8>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--reports-dir`) take precedence over long-form
    /// flags (e.g., `--config-reports-dir`) when both are provided.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let path_string = |p: &PathBuf| p.to_string_lossy().to_string();
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self.config_log_file.as_ref().map(path_string),
            verbose: self.config_verbose,
            reports_dir: self
                .reports_dir
                .as_ref()
                .or(self.config_reports_dir.as_ref())
                .map(path_string),
            catalog: self.catalog.as_ref().map(path_string),
            precision: self.precision.map(usize::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_cli() -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            catalog: None,
            config_reports_dir: None,
            reports_dir: None,
            precision: None,
            command: Command::Config { subcommand: None },
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = bare_cli().to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.reports_dir.is_none());
        assert!(overrides.catalog.is_none());
        assert!(overrides.precision.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = Cli {
            config_level: Some(LogLevelArg::Debug),
            config_log_file: Some(PathBuf::from("/tmp/test.log")),
            config_verbose: Some(true),
            catalog: Some(PathBuf::from("/tmp/catalog.toml")),
            reports_dir: Some(PathBuf::from("/output")),
            precision: Some(3),
            ..bare_cli()
        };

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.catalog, Some("/tmp/catalog.toml".to_string()));
        assert_eq!(overrides.reports_dir, Some("/output".to_string()));
        assert_eq!(overrides.precision, Some(3));
    }

    #[test]
    fn test_short_form_precedence_over_long_form() {
        let cli = Cli {
            config_reports_dir: Some(PathBuf::from("/long/out")),
            reports_dir: Some(PathBuf::from("/short/out")),
            ..bare_cli()
        };
        assert_eq!(
            cli.to_config_overrides().reports_dir,
            Some("/short/out".to_string())
        );
    }

    #[test]
    fn test_long_form_when_short_form_absent() {
        let cli = Cli {
            config_reports_dir: Some(PathBuf::from("/long/out")),
            ..bare_cli()
        };
        assert_eq!(
            cli.to_config_overrides().reports_dir,
            Some("/long/out".to_string())
        );
    }

    #[test]
    fn test_parse_gpa_command() {
        let cli = Cli::try_parse_from([
            "gpacalc", "gpa", "1", "-g", "CH3124=O", "--grade", "EN3111=B", "--export",
        ])
        .expect("parses");
        match cli.command {
            Command::Gpa {
                semester,
                grades,
                export,
                detailed,
                ..
            } => {
                assert_eq!(semester, "1");
                assert_eq!(grades, vec!["CH3124=O", "EN3111=B"]);
                assert_eq!(export, Some(None));
                assert!(!detailed);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_cgpa_command() {
        let cli = Cli::try_parse_from([
            "gpacalc", "cgpa", "1", "2", "-g", "1:CH3124=O", "--export=out.txt",
        ])
        .expect("parses");
        match cli.command {
            Command::Cgpa {
                semesters, export, ..
            } => {
                assert_eq!(semesters, vec!["1", "2"]);
                assert_eq!(export, Some(Some(PathBuf::from("out.txt"))));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_bare_export_before_semesters() {
        let cli = Cli::try_parse_from(["gpacalc", "cgpa", "--export", "1", "2"]).expect("parses");
        match cli.command {
            Command::Cgpa {
                semesters, export, ..
            } => {
                assert_eq!(semesters, vec!["1", "2"]);
                assert_eq!(export, Some(None));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_precision_range_enforced() {
        assert!(Cli::try_parse_from(["gpacalc", "--precision", "11", "scale"]).is_err());
        assert!(Cli::try_parse_from(["gpacalc", "--precision", "4", "scale"]).is_ok());
    }
}
