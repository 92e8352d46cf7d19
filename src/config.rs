//! Configuration data structures and TOML parsing.
//!
//! The config file uses TOML format. Example:
//!
//! ```toml
//! [global]
//! log_level = "info"
//!
//! [frame]
//! width = 1280
//! height = 720
//!
//! [thresholds]
//! click_distance_px = 30.0
//! hold_duration = 0.5
//! cooldown = 1.0
//!
//! [layout]
//! cell_size = 50.0
//! cell_pitch = 60.0
//! margin = 5.0
//! backspace_pos = [5.0, 280.0]
//! clear_all_pos = [165.0, 280.0]
//! special_size = [150.0, 50.0]
//! rows = [
//!     ["Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P"],
//!     ["A", "S", "D", "F", "G", "H", "J", "K", "L", ";"],
//! ]
//! ```
//!
//! Every value is optional; missing values fall back to the defaults above
//! (and a QWERTY row matrix for `rows`).

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Top-level error type used throughout the crate.
#[derive(Debug, Error)]
pub enum PinchtypeError {
    #[error("Failed to read config file {path}: {source}")]
    ConfigReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    #[error("Config validation error: '{field}' must be finite and positive, got {value}")]
    InvalidValue { field: &'static str, value: f64 },

    #[error("Config validation error: layout rows must contain at least one key")]
    EmptyLayout,
}

/// Default QWERTY character matrix. The last key of the bottom row carries a
/// two-character label, which appends both characters on click.
const DEFAULT_ROWS: [&[&str]; 3] = [
    &["Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P"],
    &["A", "S", "D", "F", "G", "H", "J", "K", "L", ";"],
    &["Z", "X", "C", "V", "B", "N", "M", ",", ".", "[]"],
];

/// Root of the TOML config file.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawConfig {
    global: RawGlobal,
    frame: RawFrame,
    thresholds: RawThresholds,
    layout: RawLayout,
}

/// The `[global]` section.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawGlobal {
    log_level: Option<String>,
    log_file: Option<String>,
}

/// The `[frame]` section - pixel dimensions of the video frame the detector
/// normalizes its landmarks against.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawFrame {
    width: Option<u32>,
    height: Option<u32>,
}

/// Interaction threshold values - all optional so the file can partially
/// override the defaults.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
struct RawThresholds {
    click_distance_px: Option<f64>,
    hold_duration: Option<f64>,
    cooldown: Option<f64>,
}

/// The `[layout]` section.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawLayout {
    rows: Option<Vec<Vec<String>>>,
    cell_size: Option<f64>,
    cell_pitch: Option<f64>,
    margin: Option<f64>,
    backspace_pos: Option<[f64; 2]>,
    clear_all_pos: Option<[f64; 2]>,
    special_size: Option<[f64; 2]>,
}

/// Fully resolved interaction thresholds - all values present and positive.
#[derive(Debug, Clone)]
pub struct InteractionThresholds {
    /// Pinch distance (pixels) below which a press is armed.
    pub click_distance_px: f64,
    /// Seconds a pinch must be held over one key to confirm a click.
    pub hold_duration: f64,
    /// Minimum seconds between two confirmed clicks.
    pub cooldown: f64,
}

impl Default for InteractionThresholds {
    fn default() -> Self {
        Self {
            click_distance_px: 30.0,
            hold_duration: 0.5,
            cooldown: 1.0,
        }
    }
}

/// Fully resolved key-layout parameters.
#[derive(Debug, Clone)]
pub struct LayoutParams {
    pub rows: Vec<Vec<String>>,
    pub cell_size: f64,
    pub cell_pitch: f64,
    pub margin: f64,
    pub backspace_pos: (f64, f64),
    pub clear_all_pos: (f64, f64),
    pub special_size: (f64, f64),
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cell_size: 50.0,
            cell_pitch: 60.0,
            margin: 5.0,
            backspace_pos: (5.0, 280.0),
            clear_all_pos: (165.0, 280.0),
            special_size: (150.0, 50.0),
        }
    }
}

/// Pixel dimensions used to convert normalized landmarks.
#[derive(Debug, Clone, Copy)]
pub struct FrameParams {
    pub width: u32,
    pub height: u32,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Top-level parsed configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub log_level: String,
    pub log_file: Option<String>,
    pub frame: FrameParams,
    pub thresholds: InteractionThresholds,
    pub layout: LayoutParams,
}

/// Build the default character matrix as owned strings.
pub fn default_rows() -> Vec<Vec<String>> {
    DEFAULT_ROWS
        .iter()
        .map(|row| row.iter().map(|s| (*s).to_string()).collect())
        .collect()
}

/// Reject non-finite and non-positive scalar config values.
fn require_positive(field: &'static str, value: f64) -> Result<f64, PinchtypeError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PinchtypeError::InvalidValue { field, value })
    }
}

/// Positions may sit at the frame origin, so zero is allowed.
fn require_non_negative(field: &'static str, value: f64) -> Result<f64, PinchtypeError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(PinchtypeError::InvalidValue { field, value })
    }
}

/// Generate default-filling validation for scalar threshold fields.
macro_rules! positive_fields {
    ($raw:ident => $validated:ident { $($field:ident),+ $(,)? }) => {
        impl $raw {
            fn into_validated(self) -> Result<$validated, PinchtypeError> {
                let defaults = $validated::default();
                Ok($validated {
                    $($field: require_positive(
                        stringify!($field),
                        self.$field.unwrap_or(defaults.$field),
                    )?,)+
                })
            }
        }
    };
}

positive_fields!(RawThresholds => InteractionThresholds {
    click_distance_px,
    hold_duration,
    cooldown,
});

impl RawLayout {
    fn into_validated(self) -> Result<LayoutParams, PinchtypeError> {
        let defaults = LayoutParams::default();

        let rows = self.rows.unwrap_or(defaults.rows);
        if rows.iter().all(|row| row.is_empty()) {
            return Err(PinchtypeError::EmptyLayout);
        }

        let pair = |field: &'static str, raw: Option<[f64; 2]>, fallback: (f64, f64)| {
            let [x, y] = raw.unwrap_or([fallback.0, fallback.1]);
            Ok::<_, PinchtypeError>((
                require_non_negative(field, x)?,
                require_non_negative(field, y)?,
            ))
        };
        let [special_w, special_h] = self
            .special_size
            .unwrap_or([defaults.special_size.0, defaults.special_size.1]);

        Ok(LayoutParams {
            rows,
            cell_size: require_positive("cell_size", self.cell_size.unwrap_or(defaults.cell_size))?,
            cell_pitch: require_positive(
                "cell_pitch",
                self.cell_pitch.unwrap_or(defaults.cell_pitch),
            )?,
            margin: require_non_negative("margin", self.margin.unwrap_or(defaults.margin))?,
            backspace_pos: pair("backspace_pos", self.backspace_pos, defaults.backspace_pos)?,
            clear_all_pos: pair("clear_all_pos", self.clear_all_pos, defaults.clear_all_pos)?,
            special_size: (
                require_positive("special_size", special_w)?,
                require_positive("special_size", special_h)?,
            ),
        })
    }
}

impl RawFrame {
    fn into_validated(self) -> Result<FrameParams, PinchtypeError> {
        let defaults = FrameParams::default();
        let width = self.width.unwrap_or(defaults.width);
        let height = self.height.unwrap_or(defaults.height);
        if width == 0 || height == 0 {
            return Err(PinchtypeError::InvalidValue {
                field: "frame dimensions",
                value: 0.0,
            });
        }
        Ok(FrameParams { width, height })
    }
}

/// Parse a TOML config file and return the fully resolved `AppConfig`.
pub fn parse_config_file(path: &Path) -> Result<AppConfig, PinchtypeError> {
    let raw: RawConfig =
        toml::from_str(
            &fs::read_to_string(path).map_err(|e| PinchtypeError::ConfigReadError {
                path: path.to_path_buf(),
                source: e,
            })?,
        )
        .map_err(|e| PinchtypeError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(AppConfig {
        log_level: raw.global.log_level.unwrap_or_else(|| "info".to_string()),
        log_file: raw.global.log_file,
        frame: raw.frame.into_validated()?,
        thresholds: raw.thresholds.into_validated()?,
        layout: raw.layout.into_validated()?,
    })
}
