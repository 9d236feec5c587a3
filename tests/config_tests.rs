//! Integration tests for configuration management

use gpa_calc::config::{Config, ConfigOverrides};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a temporary config directory
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(
        !config.paths.reports_dir.is_empty(),
        "Default reports_dir should not be empty"
    );
    assert!(
        config.paths.catalog.is_empty(),
        "Built-in catalog should be the default"
    );
    assert_eq!(config.display.precision, 2);
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[paths]
reports_dir = "./reports"
catalog = "./catalog.toml"

[display]
precision = 3
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.reports_dir, "./reports");
    assert_eq!(config.paths.catalog, "./catalog.toml");
    assert_eq!(config.display.precision, 3);
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert!(config.logging.file.is_empty());
    assert!(!config.logging.verbose);
    assert!(config.paths.reports_dir.is_empty());
    assert_eq!(config.display.precision, 2);
}

#[test]
fn test_config_from_toml_rejects_wrong_types() {
    assert!(Config::from_toml("[display]\nprecision = \"two\"\n").is_err());
    assert!(Config::from_toml("[logging\n").is_err());
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$GPA_CALC/gpacalc.log"

[paths]
reports_dir = "$GPA_CALC/reports"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");
    let dir = Config::get_gpacalc_dir();
    let dir = dir.to_string_lossy();

    assert!(!config.logging.file.contains("$GPA_CALC"));
    assert!(config.logging.file.starts_with(dir.as_ref()));
    assert!(config.paths.reports_dir.ends_with("reports"));
    assert!(config.paths.reports_dir.starts_with(dir.as_ref()));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    config.set("level", "info").expect("Failed to set level");
    assert_eq!(config.get("level"), Some("info".to_string()));

    config.set("verbose", "true").expect("Failed to set verbose");
    assert_eq!(config.get("verbose"), Some("true".to_string()));

    config
        .set("reports-dir", "/tmp/reports")
        .expect("Failed to set reports dir");
    assert_eq!(config.get("reports_dir"), Some("/tmp/reports".to_string()));

    config.set("precision", "4").expect("Failed to set precision");
    assert_eq!(config.get("precision"), Some("4".to_string()));

    assert_eq!(config.get("unknown"), None);
}

#[test]
fn test_config_set_validates_values() {
    let mut config = Config::from_defaults();

    assert!(config.set("level", "loud").is_err());
    assert!(config.set("verbose", "maybe").is_err());
    assert!(config.set("precision", "11").is_err());
    assert!(config.set("precision", "-1").is_err());
    assert!(config.set("nope", "value").is_err());

    config.set("level", "WARNING").expect("alias accepted");
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn test_config_unset() {
    let defaults = Config::from_defaults();
    let mut config = defaults.clone();

    config.set("level", "error").expect("Failed to set level");
    config.set("precision", "5").expect("Failed to set precision");
    config.unset("level", &defaults).expect("Failed to unset level");
    config
        .unset("precision", &defaults)
        .expect("Failed to unset precision");

    assert_eq!(config.logging.level, defaults.logging.level);
    assert_eq!(config.display.precision, defaults.display.precision);
    assert!(config.unset("bogus", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config.set("precision", "3").expect("Failed to set precision");

    // Save to the test location rather than the user's config directory
    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded = Config::from_toml(&content).expect("Failed to parse loaded config");

    assert_eq!(loaded.logging.level, "info");
    assert_eq!(loaded.display.precision, 3);
    assert_eq!(loaded.paths.reports_dir, config.paths.reports_dir);
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        reports_dir: Some("/custom/reports".to_string()),
        catalog: Some("/custom/catalog.toml".to_string()),
        precision: Some(0),
    };
    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.reports_dir, "/custom/reports");
    assert_eq!(config.paths.catalog, "/custom/catalog.toml");
    assert_eq!(config.display.precision, 0);
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let original = config.clone();

    config.apply_overrides(&ConfigOverrides {
        level: Some("info".to_string()),
        ..ConfigOverrides::default()
    });

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, original.logging.file);
    assert_eq!(config.paths.reports_dir, original.paths.reports_dir);
    assert_eq!(config.display.precision, original.display.precision);
}

#[test]
fn test_config_display_format() {
    let config = Config::from_defaults();
    let display = format!("{config}");

    assert!(display.contains("[logging]"));
    assert!(display.contains("[paths]"));
    assert!(display.contains("[display]"));
    assert!(display.contains("reports_dir"));
    assert!(display.contains("precision = 2"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let defaults = Config::from_defaults();
    let mut config = Config::from_toml("[logging]\nlevel = \"error\"\n").expect("Failed to parse");

    assert!(config.merge_defaults(&defaults));
    assert_eq!(config.logging.level, "error");
    assert_eq!(config.paths.reports_dir, defaults.paths.reports_dir);
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let defaults = Config::from_defaults();
    let mut config = defaults.clone();
    config.paths.reports_dir = "/kept".to_string();

    assert!(!config.merge_defaults(&defaults));
    assert_eq!(config.paths.reports_dir, "/kept");
}

#[test]
fn test_get_gpacalc_dir() {
    let dir = Config::get_gpacalc_dir();

    assert!(dir.to_string_lossy().contains("gpacalc"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();

    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
