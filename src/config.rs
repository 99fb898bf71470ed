//! Analysis configuration
//!
//! The standing threshold and the per-interval gap cap are passed explicitly to
//! the loader and the deriver instead of living as globals.

use crate::error::DeskError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Height (mm) at or above which a sample counts as standing
pub const STANDING_THRESHOLD_MM: i32 = 900;

/// Upper bound (minutes) on the duration of any single interval
pub const MAX_GAP_MINUTES: f64 = 60.0;

/// File name looked up in the home directory when no input is given
pub const DEFAULT_INPUT_FILE: &str = "desk.csv";

/// Suffix appended to the input stem to name the rendered image
pub const OUTPUT_SUFFIX: &str = "_visualization.png";

/// Tunable constants of the analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    /// Samples with `height >= standing_threshold_mm` are standing
    pub standing_threshold_mm: i32,
    /// Cap applied to every derived interval
    pub max_gap_minutes: f64,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            standing_threshold_mm: STANDING_THRESHOLD_MM,
            max_gap_minutes: MAX_GAP_MINUTES,
        }
    }
}

impl DeskConfig {
    /// Create a config with explicit values
    pub fn new(standing_threshold_mm: i32, max_gap_minutes: f64) -> Self {
        Self {
            standing_threshold_mm,
            max_gap_minutes,
        }
    }

    /// Load a config from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, DeskError> {
        let config: DeskConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values are usable
    pub fn validate(&self) -> Result<(), DeskError> {
        if !self.max_gap_minutes.is_finite() || self.max_gap_minutes <= 0.0 {
            return Err(DeskError::InvalidConfig(format!(
                "max_gap_minutes must be a positive number, got {}",
                self.max_gap_minutes
            )));
        }
        Ok(())
    }

    /// Classify a height against the threshold
    pub fn is_standing(&self, height_mm: i32) -> bool {
        height_mm >= self.standing_threshold_mm
    }
}

/// `desk.csv` in the user's home directory
pub fn default_input_path() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(DEFAULT_INPUT_FILE),
        None => PathBuf::from(DEFAULT_INPUT_FILE),
    }
}

/// Image path for an input file: `<stem>_visualization.png` in the working directory
pub fn output_path_for(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "desk".to_string());
    PathBuf::from(format!("{stem}{OUTPUT_SUFFIX}"))
}
