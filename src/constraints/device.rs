//! Device classification and facing-mode preferences.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Platform identifiers that mark a user agent as mobile.
const MOBILE_PLATFORMS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Which physical camera the caller prefers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    /// Front-facing camera.
    User,
    /// Rear-facing camera.
    Environment,
}

impl FacingMode {
    /// The constraint value understood by the platform.
    pub fn as_str(&self) -> &'static str {
        match self {
            FacingMode::User => "user",
            FacingMode::Environment => "environment",
        }
    }
}

impl fmt::Display for FacingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FacingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" | "front" => Ok(FacingMode::User),
            "environment" | "rear" | "back" => Ok(FacingMode::Environment),
            other => Err(format!("unknown facing mode: {other}")),
        }
    }
}

/// Coarse device class derived from the user agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

impl DeviceClass {
    /// Classifies a user-agent string.
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_ascii_lowercase();
        if MOBILE_PLATFORMS.iter().any(|platform| ua.contains(platform)) {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    #[inline]
    pub fn is_mobile(&self) -> bool {
        matches!(self, DeviceClass::Mobile)
    }
}

/// Whether the browser accepts a `facingMode` constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacingModeSupport {
    Supported,
    Unsupported,
    /// The browser has no way to report its supported constraints.
    Unknown,
}

impl FacingModeSupport {
    #[inline]
    pub fn is_supported(&self) -> bool {
        matches!(self, FacingModeSupport::Supported)
    }
}
