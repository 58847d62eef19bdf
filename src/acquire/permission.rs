//! Camera permission state as reported by the platform.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Tri-state camera permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    Granted,
    Denied,
    /// The user has not answered the prompt yet.
    Prompt,
}

impl FromStr for PermissionState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "granted" => Ok(PermissionState::Granted),
            "denied" => Ok(PermissionState::Denied),
            "prompt" => Ok(PermissionState::Prompt),
            other => Err(format!("unknown permission state: {other}")),
        }
    }
}

impl PermissionState {
    /// Whether moving from `previous` to `self` warrants a fresh acquisition.
    ///
    /// Only a transition into `Granted` does; nothing is retried on its own.
    pub fn warrants_reacquire(self, previous: Option<PermissionState>) -> bool {
        self == PermissionState::Granted && previous != Some(PermissionState::Granted)
    }
}
