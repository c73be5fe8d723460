//! Configuration loading and management.
//!
//! Configuration can be built programmatically or loaded from an
//! `ocrblocks.toml` file, either at an explicit path or discovered by walking up
//! from the current directory. Missing keys fall back to the defaults.

use crate::merge::{HORIZONTAL_GAP, ROW_TOLERANCE, VERTICAL_GAP};
use crate::{OcrBlocksError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name searched for by [`OcrBlocksConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "ocrblocks.toml";

/// Top-level configuration.
///
/// # Example
///
/// ```rust
/// use ocrblocks::core::config::OcrBlocksConfig;
///
/// let config = OcrBlocksConfig::default();
/// assert!(config.merge.enabled);
/// assert_eq!(config.merge.horizontal_gap, 20);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrBlocksConfig {
    /// Box merging options
    #[serde(default)]
    pub merge: MergeConfig,

    /// Tesseract TSV input options
    #[serde(default)]
    pub tsv: TsvConfig,
}

/// Box merging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Merge word boxes into blocks (false = return word boxes as they are)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Horizontal slack in pixels between boxes of one block
    #[serde(default = "default_horizontal_gap")]
    pub horizontal_gap: u32,

    /// Vertical slack in pixels between boxes of one block
    #[serde(default = "default_vertical_gap")]
    pub vertical_gap: u32,

    /// Top edges closer than this many pixels are read as the same row
    #[serde(default = "default_row_tolerance")]
    pub row_tolerance: u32,
}

/// Tesseract TSV parsing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TsvConfig {
    /// Words with a lower confidence are dropped
    #[serde(default)]
    pub min_confidence: f64,
}

fn default_true() -> bool {
    true
}

fn default_horizontal_gap() -> u32 {
    HORIZONTAL_GAP
}

fn default_vertical_gap() -> u32 {
    VERTICAL_GAP
}

fn default_row_tolerance() -> u32 {
    ROW_TOLERANCE
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            horizontal_gap: HORIZONTAL_GAP,
            vertical_gap: VERTICAL_GAP,
            row_tolerance: ROW_TOLERANCE,
        }
    }
}

impl Default for TsvConfig {
    fn default() -> Self {
        Self { min_confidence: 0.0 }
    }
}

impl TsvConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.min_confidence.is_finite() {
            return Err(OcrBlocksError::validation(format!(
                "tsv.min_confidence must be a finite number, got {}",
                self.min_confidence
            )));
        }
        Ok(())
    }
}

impl OcrBlocksConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `OcrBlocksError::Validation` if the file cannot be read, is not
    /// valid TOML, or holds out-of-range values.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            OcrBlocksError::validation(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| OcrBlocksError::validation(format!("Invalid TOML in {}: {}", path.display(), e)))?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Discover `ocrblocks.toml` in the current directory or any parent.
    ///
    /// # Returns
    ///
    /// - `Some(config)` if found
    /// - `None` if no config file found
    pub fn discover() -> Result<Option<Self>> {
        let current = std::env::current_dir().map_err(OcrBlocksError::Io)?;
        Self::discover_from(&current)
    }

    /// Like [`discover`](Self::discover), starting from `start` instead of the
    /// current directory.
    pub fn discover_from(start: &Path) -> Result<Option<Self>> {
        for dir in start.ancestors() {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                return Ok(Some(Self::from_toml_file(candidate)?));
            }
        }

        Ok(None)
    }

    pub fn validate(&self) -> Result<()> {
        self.tsv.validate()
    }
}
