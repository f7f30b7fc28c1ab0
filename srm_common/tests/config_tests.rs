//! Configuration file tests.
//!
//! Tests for `srm.toml` loading: partial files falling back to defaults,
//! unknown field rejection, numeric bounds validation.

use srm_common::config::{ConfigError, ConfigLoader, LogLevel, SimConfig};
use srm_common::consts::{DEFAULT_SWEEP_MAX, MAX_POLES};
use srm_common::motor::MotorConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write `content` as srm.toml in the given directory.
fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("srm.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn empty_file_yields_defaults() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(tmp.path(), "");

    let config = SimConfig::load(&path).unwrap();
    assert_eq!(config, SimConfig::default());
    assert_eq!(config.motor, MotorConfig::new(30.0, 6.0, 3, 4));
}

#[test]
fn partial_motor_section_keeps_other_defaults() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(
        tmp.path(),
        r#"
[motor]
pole_count = 10
"#,
    );

    let config = SimConfig::load(&path).unwrap();
    assert_eq!(config.motor.pole_count, 10);
    assert_eq!(config.motor.coil_count, 3);
    assert_eq!(config.motor.outer_diameter, 30.0);
    assert_eq!(config.sweep.max_count, DEFAULT_SWEEP_MAX);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

#[test]
fn session_file_path_is_read() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(tmp.path(), r#"session_file = "/var/tmp/srm_session""#);

    let config = SimConfig::load(&path).unwrap();
    assert_eq!(
        config.session_file.as_deref(),
        Some(Path::new("/var/tmp/srm_session"))
    );
}

#[test]
fn unknown_fields_are_rejected() {
    let tmp = TempDir::new().unwrap();

    for content in [
        "colour = \"red\"",
        "[motor]\nstator_teeth = 6",
        "[sweep]\nmax = 6",
    ] {
        let path = write_config(tmp.path(), content);
        assert!(
            matches!(SimConfig::load(&path), Err(ConfigError::ParseError(_))),
            "accepted: {content}"
        );
    }
}

#[test]
fn wrong_types_are_parse_errors() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(tmp.path(), "[motor]\ncoil_count = \"three\"");
    assert!(matches!(
        SimConfig::load(&path),
        Err(ConfigError::ParseError(_))
    ));
}

#[test]
fn out_of_range_values_fail_validation() {
    let tmp = TempDir::new().unwrap();
    let too_many_poles = format!("[motor]\npole_count = {}", MAX_POLES + 1);

    for content in [
        "[motor]\ncoil_count = 0",
        too_many_poles.as_str(),
        "[motor]\nouter_diameter = -1.0",
        "[motor]\nouter_diameter = 6.0\ncoil_diameter = 6.0",
        "[sweep]\nmax_count = 0",
    ] {
        let path = write_config(tmp.path(), content);
        let config = SimConfig::load(&path).unwrap();
        assert!(
            matches!(config.validate(), Err(ConfigError::ValidationError(_))),
            "validated: {content}"
        );
    }
}
