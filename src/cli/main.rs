//! Command-line interface entry point for `gpa-calc`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use commands::calc::CalcOptions;
use gpa_calc::config::Config;
use gpa_calc::core::Catalog;
use gpa_calc::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use gpa_calc::info;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // File logging: CLI flag wins, otherwise config logging.file if set
    let config_log_path = (!config.logging.file.is_empty())
        .then(|| PathBuf::from(&config.logging.file));
    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        if init_file_logging(log_path) {
            info!("File logging initialized at: {}", log_path.display());
        } else {
            eprintln!(
                "✗ Failed to initialize file logging at: {}",
                log_path.display()
            );
        }
    }

    if let Err(e) = dispatch(args.command, &mut config, &defaults) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// Resolve the catalog: the configured file if any, else the built-in one
fn load_catalog(config: &Config) -> Result<Cow<'static, Catalog>, String> {
    if config.paths.catalog.is_empty() {
        return Ok(Cow::Borrowed(Catalog::builtin()));
    }
    let catalog = Catalog::from_file(Path::new(&config.paths.catalog))
        .map_err(|e| format!("✗ {e}"))?;
    info!("Using catalog {}", config.paths.catalog);
    Ok(Cow::Owned(catalog))
}

fn dispatch(command: Command, config: &mut Config, defaults: &Config) -> Result<(), String> {
    match command {
        Command::Config { subcommand } => commands::config::run(subcommand, config, defaults),
        other => run_with_catalog(other, config),
    }
}

fn run_with_catalog(command: Command, config: &Config) -> Result<(), String> {
    let catalog = load_catalog(config)?;
    match command {
        Command::Config { .. } => Ok(()),
        Command::Semesters => {
            commands::catalog::run_semesters(&catalog);
            Ok(())
        }
        Command::Subjects { semester } => commands::catalog::run_subjects(&catalog, &semester),
        Command::Scale => {
            commands::catalog::run_scale();
            Ok(())
        }
        Command::Gpa {
            semester,
            grades,
            grades_file,
            export,
            detailed,
        } => {
            let options = CalcOptions {
                assignments: &grades,
                grades_file: grades_file.as_deref(),
                export: export.as_ref().map(Option::as_deref),
                detailed,
            };
            commands::calc::run_gpa(&catalog, config, &semester, &options)
        }
        Command::Cgpa {
            semesters,
            grades,
            grades_file,
            export,
            detailed,
        } => {
            let options = CalcOptions {
                assignments: &grades,
                grades_file: grades_file.as_deref(),
                export: export.as_ref().map(Option::as_deref),
                detailed,
            };
            commands::calc::run_cgpa(&catalog, config, &semesters, &options)
        }
        Command::Shell => commands::shell::run(&catalog, config),
    }
}
