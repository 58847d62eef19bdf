//! Resolution of camera options into media constraints.

use super::device::{DeviceClass, FacingMode, FacingModeSupport};
use super::resolution::{ResolutionError, ResolutionSpec, DEFAULT_IDEAL, DEFAULT_MIN};
use serde::Serialize;

/// A constrainable numeric property with a floor and a preferred value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConstrainRange {
    pub min: u32,
    pub ideal: u32,
}

/// A preference the platform may ignore. Never a hard requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IdealOnly<T> {
    pub ideal: T,
}

/// Video track constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoConstraints {
    pub width: ConstrainRange,
    pub height: ConstrainRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facing_mode: Option<IdealOnly<FacingMode>>,
}

/// The descriptor handed to the platform when requesting a stream.
///
/// Serializes to the `MediaStreamConstraints` dictionary shape, e.g.
/// `{"audio":false,"video":{"width":{"min":640,"ideal":1920},...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaConstraints {
    audio: bool,
    video: VideoConstraints,
}

impl MediaConstraints {
    /// Audio is never requested.
    #[inline]
    pub fn audio(&self) -> bool {
        self.audio
    }

    #[inline]
    pub fn video(&self) -> &VideoConstraints {
        &self.video
    }

    /// Returns the ideal resolution requested.
    pub fn ideal_resolution(&self) -> (u32, u32) {
        (self.video.width.ideal, self.video.height.ideal)
    }

    /// Returns the minimum resolution requested.
    pub fn min_resolution(&self) -> (u32, u32) {
        (self.video.width.min, self.video.height.min)
    }

    /// Returns the facing-mode hint, if one was included.
    pub fn facing_mode(&self) -> Option<FacingMode> {
        self.video.facing_mode.map(|hint| hint.ideal)
    }

    /// Encodes the constraints as the JSON dictionary the platform expects.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Resolves caller options into concrete media constraints.
///
/// Missing resolutions fall back to 1920x1080 ideal and 640x480 minimum.
/// The facing-mode hint is only attached when the browser reports support
/// for it, the device is mobile, and the caller asked for one. A browser
/// that cannot report support degrades to constraints without the hint.
pub fn resolve(
    ideal_resolution: Option<&str>,
    min_resolution: Option<&str>,
    ideal_facing_mode: Option<FacingMode>,
    device: DeviceClass,
    facing_support: FacingModeSupport,
) -> Result<MediaConstraints, ResolutionError> {
    let ideal = ideal_resolution
        .map(ResolutionSpec::parse)
        .transpose()?
        .unwrap_or(DEFAULT_IDEAL);
    let min = min_resolution
        .map(ResolutionSpec::parse)
        .transpose()?
        .unwrap_or(DEFAULT_MIN);

    let facing_mode = match facing_support {
        FacingModeSupport::Unknown => {
            tracing::warn!(
                "Browser cannot report supported constraints; facing mode will not be requested"
            );
            None
        }
        FacingModeSupport::Unsupported => {
            tracing::warn!(
                "Browser does not support the facingMode constraint; front/rear camera cannot be chosen"
            );
            None
        }
        FacingModeSupport::Supported if device.is_mobile() => {
            ideal_facing_mode.map(|ideal| IdealOnly { ideal })
        }
        FacingModeSupport::Supported => None,
    };

    let constraints = MediaConstraints {
        audio: false,
        video: VideoConstraints {
            width: ConstrainRange {
                min: min.width(),
                ideal: ideal.width(),
            },
            height: ConstrainRange {
                min: min.height(),
                ideal: ideal.height(),
            },
            facing_mode,
        },
    };

    tracing::debug!(
        ideal = %ideal,
        min = %min,
        facing_mode = ?constraints.facing_mode(),
        "Resolved media constraints"
    );

    Ok(constraints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn facing() -> impl Strategy<Value = Option<FacingMode>> {
        prop_oneof![
            Just(None),
            Just(Some(FacingMode::User)),
            Just(Some(FacingMode::Environment)),
        ]
    }

    #[test]
    fn test_defaults_applied() {
        let c = resolve(
            None,
            None,
            None,
            DeviceClass::Desktop,
            FacingModeSupport::Supported,
        )
        .unwrap();
        assert_eq!(c.ideal_resolution(), (1920, 1080));
        assert_eq!(c.min_resolution(), (640, 480));
        assert!(!c.audio());
        assert_eq!(c.facing_mode(), None);
    }

    #[test]
    fn test_explicit_resolutions() {
        let c = resolve(
            Some("1280x720"),
            Some("320x240"),
            None,
            DeviceClass::Desktop,
            FacingModeSupport::Supported,
        )
        .unwrap();
        assert_eq!(c.ideal_resolution(), (1280, 720));
        assert_eq!(c.min_resolution(), (320, 240));
    }

    #[test]
    fn test_malformed_resolution_surfaces() {
        let result = resolve(
            Some("1280by720"),
            None,
            None,
            DeviceClass::Desktop,
            FacingModeSupport::Supported,
        );
        assert!(matches!(result, Err(ResolutionError::MissingSeparator(_))));

        let result = resolve(
            None,
            Some("x"),
            None,
            DeviceClass::Desktop,
            FacingModeSupport::Supported,
        );
        assert!(matches!(result, Err(ResolutionError::NonNumeric(_))));
    }

    #[test]
    fn test_facing_mode_on_supported_mobile() {
        let c = resolve(
            None,
            None,
            Some(FacingMode::Environment),
            DeviceClass::Mobile,
            FacingModeSupport::Supported,
        )
        .unwrap();
        assert_eq!(c.facing_mode(), Some(FacingMode::Environment));
    }

    #[test]
    fn test_unknown_support_still_resolves() {
        let c = resolve(
            None,
            None,
            Some(FacingMode::User),
            DeviceClass::Mobile,
            FacingModeSupport::Unknown,
        )
        .unwrap();
        assert_eq!(c.facing_mode(), None);
        assert_eq!(c.ideal_resolution(), (1920, 1080));
    }

    #[test]
    fn test_json_shape() {
        let c = resolve(
            Some("1280x720"),
            None,
            Some(FacingMode::User),
            DeviceClass::Mobile,
            FacingModeSupport::Supported,
        )
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&c.to_json().unwrap()).unwrap();
        assert_eq!(json["audio"], false);
        assert_eq!(json["video"]["width"]["min"], 640);
        assert_eq!(json["video"]["width"]["ideal"], 1280);
        assert_eq!(json["video"]["height"]["ideal"], 720);
        assert_eq!(json["video"]["facingMode"]["ideal"], "user");
    }

    #[test]
    fn test_json_omits_absent_facing_mode() {
        let c = resolve(
            None,
            None,
            None,
            DeviceClass::Desktop,
            FacingModeSupport::Supported,
        )
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&c.to_json().unwrap()).unwrap();
        assert!(json["video"].get("facingMode").is_none());
    }

    proptest! {
        #[test]
        fn prop_no_hint_without_support(pref in facing(), mobile in any::<bool>(), unknown in any::<bool>()) {
            let device = if mobile { DeviceClass::Mobile } else { DeviceClass::Desktop };
            let support = if unknown { FacingModeSupport::Unknown } else { FacingModeSupport::Unsupported };
            let c = resolve(None, None, pref, device, support).unwrap();
            prop_assert_eq!(c.facing_mode(), None);
        }

        #[test]
        fn prop_no_hint_on_desktop(pref in facing()) {
            let c = resolve(None, None, pref, DeviceClass::Desktop, FacingModeSupport::Supported).unwrap();
            prop_assert_eq!(c.facing_mode(), None);
        }
    }
}
