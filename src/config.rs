//! Tool configuration.
//!
//! Handles loading, validating, and merging `lqip.toml`. Stock defaults are
//! overridden by the user file, which is in turn overridden by CLI flags.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! data_path = "mock-data/data.json"  # Content document, read and overwritten
//!
//! [remote]
//! base_url = "https://data.palavara.com/img/"  # Identifier is appended as-is
//! timeout_secs = 30         # Per-image request timeout
//!
//! [placeholder]
//! width = 20                # Maximum placeholder width in pixels
//! blur_sigma = 3.0          # Gaussian blur (0 disables)
//! quality = 20              # JPEG quality (1-100)
//!
//! [processing]
//! batch_size = 5            # Images fetched concurrently per batch
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [remote]
//! base_url = "http://localhost:3061/img/"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{Blur, PlaceholderConfig, Quality};
use crate::process::DEFAULT_BATCH_SIZE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILENAME: &str = "lqip.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `lqip.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LqipConfig {
    /// Content document to read and overwrite.
    pub data_path: PathBuf,
    /// Where source images are fetched from.
    pub remote: RemoteConfig,
    /// Placeholder size and encoding.
    pub placeholder: PlaceholderSettings,
    /// Batch concurrency.
    pub processing: ProcessingConfig,
}

impl Default for LqipConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("mock-data/data.json"),
            remote: RemoteConfig::default(),
            placeholder: PlaceholderSettings::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl LqipConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.remote.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "remote.base_url must not be empty".into(),
            ));
        }
        if self.remote.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "remote.timeout_secs must be at least 1".into(),
            ));
        }
        if self.placeholder.width == 0 {
            return Err(ConfigError::Validation(
                "placeholder.width must be at least 1".into(),
            ));
        }
        if !self.placeholder.blur_sigma.is_finite() || self.placeholder.blur_sigma < 0.0 {
            return Err(ConfigError::Validation(
                "placeholder.blur_sigma must be a non-negative number".into(),
            ));
        }
        if !(1..=100).contains(&self.placeholder.quality) {
            return Err(ConfigError::Validation(
                "placeholder.quality must be 1-100".into(),
            ));
        }
        if self.processing.batch_size == 0 {
            return Err(ConfigError::Validation(
                "processing.batch_size must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn placeholder_config(&self) -> PlaceholderConfig {
        PlaceholderConfig {
            max_width: self.placeholder.width,
            blur: Blur::new(self.placeholder.blur_sigma),
            quality: Quality::new(self.placeholder.quality),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.remote.timeout_secs)
    }
}

/// Remote image host settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteConfig {
    /// Prefix every identifier is appended to. Keep the trailing slash.
    pub base_url: String,
    /// Per-image request timeout in seconds. A timeout counts as a failed
    /// image, not a failed run.
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://data.palavara.com/img/".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Placeholder encoding settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaceholderSettings {
    /// Maximum width in pixels; height follows the aspect ratio.
    pub width: u32,
    /// Gaussian blur sigma. 0 disables the blur.
    pub blur_sigma: f32,
    /// JPEG quality (1 = worst, 100 = best).
    pub quality: u32,
}

impl Default for PlaceholderSettings {
    fn default() -> Self {
        Self {
            width: 20,
            blur_sigma: 3.0,
            quality: 20,
        }
    }
}

/// Batch processing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Number of images fetched and encoded concurrently. The next batch
    /// starts only once the current one has finished.
    pub batch_size: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(LqipConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<LqipConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: LqipConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults when the file is
/// absent. An explicitly requested file that is missing is an error.
pub fn load_config(path: &Path, required: bool) -> Result<LqipConfig, ConfigError> {
    let overlay = load_raw_config(path)?;
    if overlay.is_none() && required {
        return Err(ConfigError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("config file not found: {}", path.display()),
        )));
    }
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `lqip.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# gallery-lqip configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.
# Command-line flags override values from this file.

# Content document to read, fill with placeholders, and overwrite.
data_path = "mock-data/data.json"

# ---------------------------------------------------------------------------
# Image host
# ---------------------------------------------------------------------------
[remote]
# Each identifier is appended to this prefix as-is. Keep the trailing slash.
base_url = "https://data.palavara.com/img/"

# Per-image request timeout in seconds. A timed-out image is skipped.
timeout_secs = 30

# ---------------------------------------------------------------------------
# Placeholder encoding
# ---------------------------------------------------------------------------
[placeholder]
# Maximum width in pixels. Height follows the aspect ratio.
# Images narrower than this keep their size.
width = 20

# Gaussian blur sigma applied after downsampling. 0 disables the blur.
blur_sigma = 3.0

# JPEG quality (1 = worst, 100 = best).
quality = 20

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Images fetched concurrently. Batches run one after another.
batch_size = 5
"##
}
