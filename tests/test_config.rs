//! Tests for `pinchtype::config` - TOML parsing, default filling,
//! validation, and error handling.

use std::io::Write;
use tempfile::NamedTempFile;

use pinchtype::config::{AppConfig, parse_config_file};

// ── Helpers ──────────────────────────────────────────────────

/// Write TOML to a temp file and parse it.
fn load(toml_content: &str) -> AppConfig {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(toml_content.as_bytes()).unwrap();
    f.flush().unwrap();
    parse_config_file(f.path()).unwrap()
}

/// Parse raw TOML that is expected to fail.
fn load_err(toml_content: &str) -> String {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(toml_content.as_bytes()).unwrap();
    f.flush().unwrap();
    parse_config_file(f.path()).unwrap_err().to_string()
}

// ── Error handling ───────────────────────────────────────────

#[test]
fn test_file_not_found() {
    let msg = parse_config_file(std::path::Path::new("/no/such/file.toml"))
        .unwrap_err()
        .to_string();
    assert!(msg.contains("Failed to read config file"));
    assert!(msg.contains("/no/such/file.toml"));
}

#[test]
fn test_invalid_toml() {
    let msg = load_err("this is not valid toml [[[");
    assert!(msg.contains("Failed to parse config file"));
}

#[test]
fn test_negative_threshold_rejected() {
    let msg = load_err(
        r#"
[thresholds]
hold_duration = -0.5
"#,
    );
    assert!(msg.contains("hold_duration"));
    assert!(msg.contains("finite and positive"));
}

#[test]
fn test_zero_click_distance_rejected() {
    let msg = load_err(
        r#"
[thresholds]
click_distance_px = 0.0
"#,
    );
    assert!(msg.contains("click_distance_px"));
}

#[test]
fn test_zero_cell_pitch_rejected() {
    let msg = load_err(
        r#"
[layout]
cell_pitch = 0.0
"#,
    );
    assert!(msg.contains("cell_pitch"));
}

#[test]
fn test_empty_rows_rejected() {
    let msg = load_err(
        r#"
[layout]
rows = [[], []]
"#,
    );
    assert!(msg.contains("at least one key"));
}

#[test]
fn test_zero_frame_rejected() {
    let msg = load_err(
        r#"
[frame]
width = 0
"#,
    );
    assert!(msg.contains("frame dimensions"));
}

#[test]
fn test_negative_special_position_rejected() {
    let msg = load_err(
        r#"
[layout]
backspace_pos = [-10.0, 280.0]
"#,
    );
    assert!(msg.contains("backspace_pos"));
}

// ── Empty / minimal configs ──────────────────────────────────

#[test]
fn test_empty_config_gets_defaults() {
    let config = load("");
    assert_eq!(config.log_level, "info");
    assert_eq!(config.log_file, None);
    assert_eq!(config.frame.width, 1280);
    assert_eq!(config.frame.height, 720);
    assert_eq!(config.thresholds.click_distance_px, 30.0);
    assert_eq!(config.thresholds.hold_duration, 0.5);
    assert_eq!(config.thresholds.cooldown, 1.0);
    assert_eq!(config.layout.cell_size, 50.0);
    assert_eq!(config.layout.cell_pitch, 60.0);
    assert_eq!(config.layout.margin, 5.0);
    assert_eq!(config.layout.backspace_pos, (5.0, 280.0));
    assert_eq!(config.layout.clear_all_pos, (165.0, 280.0));
    assert_eq!(config.layout.special_size, (150.0, 50.0));
}

#[test]
fn test_default_rows_are_qwerty() {
    let config = load("");
    assert_eq!(config.layout.rows.len(), 3);
    assert_eq!(config.layout.rows[0].len(), 10);
    assert_eq!(config.layout.rows[0][0], "Q");
    assert_eq!(config.layout.rows[1][0], "A");
    // Bottom-right key carries a two-character label.
    assert_eq!(config.layout.rows[2][9], "[]");
}

#[test]
fn test_global_log_settings() {
    let config = load(
        r#"
[global]
log_level = "debug"
log_file = "/tmp/pinchtype.log"
"#,
    );
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.log_file.as_deref(), Some("/tmp/pinchtype.log"));
}

#[test]
fn test_unknown_keys_ignored() {
    let config = load(
        r#"
[foobar]
setting = "value"

[thresholds]
cooldown = 2.0
"#,
    );
    assert_eq!(config.thresholds.cooldown, 2.0);
}

// ── Partial overrides ────────────────────────────────────────

#[test]
fn test_partial_threshold_override() {
    let config = load(
        r#"
[thresholds]
hold_duration = 0.8
"#,
    );
    assert_eq!(config.thresholds.hold_duration, 0.8);
    // Untouched fields keep their defaults.
    assert_eq!(config.thresholds.click_distance_px, 30.0);
    assert_eq!(config.thresholds.cooldown, 1.0);
}

#[test]
fn test_frame_override() {
    let config = load(
        r#"
[frame]
width = 1920
height = 1080
"#,
    );
    assert_eq!(config.frame.width, 1920);
    assert_eq!(config.frame.height, 1080);
}

#[test]
fn test_custom_rows() {
    let config = load(
        r#"
[layout]
rows = [["A", "B"], ["C"]]
"#,
    );
    assert_eq!(config.layout.rows, vec![vec!["A", "B"], vec!["C"]]);
}

#[test]
fn test_special_key_positions() {
    let config = load(
        r#"
[layout]
backspace_pos = [0.0, 300.0]
clear_all_pos = [200.0, 300.0]
special_size = [120.0, 40.0]
"#,
    );
    assert_eq!(config.layout.backspace_pos, (0.0, 300.0));
    assert_eq!(config.layout.clear_all_pos, (200.0, 300.0));
    assert_eq!(config.layout.special_size, (120.0, 40.0));
}
