//! The host platform's camera-access surface.
//!
//! Browsers have shipped several mutually exclusive entry points over
//! the years. [`MediaHost`] exposes what a given host offers without
//! deciding how to use it; see [`super::UserMedia`] for that.

use crate::constraints::{FacingModeSupport, MediaConstraints};
use std::fmt;

/// A legacy callback-style `getUserMedia` entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyVendor {
    /// Unprefixed `navigator.getUserMedia`.
    Standard,
    /// `navigator.webkitGetUserMedia`.
    Webkit,
    /// `navigator.mozGetUserMedia`.
    Moz,
    /// `navigator.msGetUserMedia`.
    Ms,
}

impl LegacyVendor {
    /// Probe order, most to least standard.
    pub const ALL: [LegacyVendor; 4] = [
        LegacyVendor::Standard,
        LegacyVendor::Webkit,
        LegacyVendor::Moz,
        LegacyVendor::Ms,
    ];

    /// Name of the function on `navigator`.
    pub fn function_name(&self) -> &'static str {
        match self {
            LegacyVendor::Standard => "getUserMedia",
            LegacyVendor::Webkit => "webkitGetUserMedia",
            LegacyVendor::Moz => "mozGetUserMedia",
            LegacyVendor::Ms => "msGetUserMedia",
        }
    }
}

/// Result of the capability probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPoint {
    /// No camera access at all.
    None,
    /// Promise-based `navigator.mediaDevices.getUserMedia`.
    Modern,
    Legacy(LegacyVendor),
}

/// A rejection reported by the platform, usually a `DOMException`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformError {
    /// Exception name, e.g. `NotAllowedError`.
    pub name: String,
    pub message: String,
}

impl PlatformError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// True if the user or a policy refused access.
    pub fn is_permission_denial(&self) -> bool {
        matches!(
            self.name.as_str(),
            "NotAllowedError" | "PermissionDeniedError" | "PermissionDismissedError" | "SecurityError"
        )
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}: {}", self.name, self.message)
        }
    }
}

/// A live media stream owned by a session.
pub trait LiveStream: Clone + 'static {
    /// Platform identifier of the stream.
    fn id(&self) -> String;

    /// Stops every track, releasing the device.
    fn stop(&self);
}

/// Callback invoked by a legacy entry point on success.
pub type SuccessCallback<S> = Box<dyn FnOnce(S)>;
/// Callback invoked by a legacy entry point on failure.
pub type ErrorCallback = Box<dyn FnOnce(PlatformError)>;

/// Access to the host's media APIs.
#[allow(async_fn_in_trait)]
pub trait MediaHost {
    type Stream: LiveStream;

    /// Detects which camera-access entry point the host exposes.
    fn probe(&self) -> EntryPoint;

    /// Reports whether the `facingMode` constraint is supported.
    fn facing_mode_support(&self) -> FacingModeSupport;

    /// The host's user-agent string.
    fn user_agent(&self) -> String;

    /// Calls the promise-based entry point.
    async fn request_stream(
        &self,
        constraints: &MediaConstraints,
    ) -> Result<Self::Stream, PlatformError>;

    /// Calls a legacy callback-based entry point. Exactly one of the
    /// callbacks is invoked, possibly after this call returns.
    fn request_stream_legacy(
        &self,
        vendor: LegacyVendor,
        constraints: &MediaConstraints,
        on_success: SuccessCallback<Self::Stream>,
        on_error: ErrorCallback,
    );

    /// Creates a blob URL for sinks that cannot take a stream object.
    fn create_object_url(&self, stream: &Self::Stream) -> Result<String, PlatformError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_classification() {
        assert!(PlatformError::new("NotAllowedError", "denied").is_permission_denial());
        assert!(PlatformError::new("PermissionDeniedError", "").is_permission_denial());
        assert!(!PlatformError::new("NotReadableError", "busy").is_permission_denial());
        assert!(!PlatformError::new("OverconstrainedError", "").is_permission_denial());
    }

    #[test]
    fn test_display() {
        assert_eq!(PlatformError::new("NotFoundError", "").to_string(), "NotFoundError");
        assert_eq!(
            PlatformError::new("NotReadableError", "device busy").to_string(),
            "NotReadableError: device busy"
        );
    }
}
