//! Camera configuration.
//!
//! Options mirror what a caller hands the camera component. Resolution
//! strings are kept as written and only parsed when constraints are
//! resolved, so a malformed value is reported where it is used.

use crate::capture::{CropPolicy, DEFAULT_JPEG_QUALITY};
use crate::constraints::{
    resolve, DeviceClass, FacingMode, FacingModeSupport, MediaConstraints, ResolutionError,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options for one camera component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraOptions {
    /// Preferred resolution, e.g. `"1920x1080"`.
    pub ideal_resolution: Option<String>,
    /// Lowest acceptable resolution, e.g. `"640x480"`.
    pub min_resolution: Option<String>,
    /// Preferred camera on mobile devices.
    pub ideal_facing_mode: Option<FacingMode>,
    /// Crop policy shared by the preview and captures.
    pub crop_to_fit: CropPolicy,
    /// Mirror the preview horizontally.
    pub mirror_image: bool,
    /// JPEG quality of captures (1-100).
    pub jpeg_quality: u8,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            ideal_resolution: None,
            min_resolution: None,
            ideal_facing_mode: None,
            crop_to_fit: CropPolicy::Fill,
            mirror_image: false,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl CameraOptions {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::InvalidQuality(self.jpeg_quality));
        }
        Ok(())
    }

    /// Resolves these options into media constraints.
    pub fn constraints(
        &self,
        device: DeviceClass,
        facing_support: FacingModeSupport,
    ) -> Result<MediaConstraints, ResolutionError> {
        resolve(
            self.ideal_resolution.as_deref(),
            self.min_resolution.as_deref(),
            self.ideal_facing_mode,
            device,
            facing_support,
        )
    }
}

/// Configuration errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid JPEG quality {0} (must be 1-100)")]
    InvalidQuality(u8),
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
///
/// ```toml
/// [camera]
/// ideal_resolution = "1280x720"
/// ideal_facing_mode = "environment"
/// crop_to_fit = "3:4"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub camera: CameraOptions,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.camera.validate()?;
        Ok(config)
    }
}
