//! Crop policies and the preview layout they imply.
//!
//! A policy drives both how the live preview is laid out and how a still
//! is cut from the frame. [`PreviewLayout::for_policy`] and
//! [`super::plan_crop`] are the two readers; they must be given the same
//! value or the capture will not match what the user saw.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the live frame maps onto the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CropPolicy {
    /// Stretch the whole frame to the viewport, ignoring aspect ratio.
    #[default]
    #[serde(rename = "none")]
    Fill,
    /// Portrait 3:4 window cut from the horizontal center of the frame.
    #[serde(rename = "3:4")]
    Portrait3x4,
}

impl CropPolicy {
    /// Aspect ratio the viewport is locked to, as (width, height).
    pub fn aspect_ratio(&self) -> Option<(u32, u32)> {
        match self {
            CropPolicy::Fill => None,
            CropPolicy::Portrait3x4 => Some((3, 4)),
        }
    }
}

impl fmt::Display for CropPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CropPolicy::Fill => f.write_str("none"),
            CropPolicy::Portrait3x4 => f.write_str("3:4"),
        }
    }
}

impl FromStr for CropPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" | "fill" => Ok(CropPolicy::Fill),
            "3:4" => Ok(CropPolicy::Portrait3x4),
            other => Err(format!("unsupported crop policy: {other}")),
        }
    }
}

/// Layout of the element bounding the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerLayout {
    pub aspect_ratio: Option<(u32, u32)>,
    /// Height follows from width and aspect ratio.
    pub auto_height: bool,
}

/// Layout of the video element inside the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoLayout {
    /// Full container height at natural width, centered horizontally so
    /// the container trims both sides equally.
    pub centered: bool,
    /// Flipped horizontally, like a mirror. Captures are never flipped.
    pub mirrored: bool,
}

/// Preview layout derived from a crop policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLayout {
    pub policy: CropPolicy,
    pub container: ContainerLayout,
    pub video: VideoLayout,
}

impl PreviewLayout {
    pub fn for_policy(policy: CropPolicy, mirrored: bool) -> Self {
        let cropped = policy.aspect_ratio().is_some();
        Self {
            policy,
            container: ContainerLayout {
                aspect_ratio: policy.aspect_ratio(),
                auto_height: cropped,
            },
            video: VideoLayout {
                centered: cropped,
                mirrored,
            },
        }
    }

    /// Inline CSS for the container element.
    pub fn container_css(&self) -> String {
        let mut css = String::from("display:block;overflow:hidden;position:relative;margin:0 auto;");
        match self.container.aspect_ratio {
            Some((w, h)) => css.push_str(&format!("max-width:100%;height:auto;aspect-ratio:{w} / {h};")),
            None => css.push_str("aspect-ratio:auto;"),
        }
        css
    }

    /// Inline CSS for the video element.
    pub fn video_css(&self) -> String {
        let mut transforms = Vec::new();
        let mut css = if self.video.centered {
            transforms.push("translateX(-50%)");
            String::from("max-width:none;width:auto;height:100%;position:relative;left:50%;")
        } else {
            String::from("width:100%;height:100%;position:absolute;left:auto;")
        };
        if self.video.mirrored {
            transforms.push("rotateY(180deg)");
        }
        if transforms.is_empty() {
            css.push_str("transform:none;");
        } else {
            css.push_str(&format!("transform:{};", transforms.join(" ")));
        }
        css
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_strings() {
        assert_eq!("3:4".parse(), Ok(CropPolicy::Portrait3x4));
        assert_eq!("none".parse(), Ok(CropPolicy::Fill));
        assert!("4:3".parse::<CropPolicy>().is_err());
        assert_eq!(CropPolicy::Portrait3x4.to_string(), "3:4");
    }

    #[test]
    fn test_portrait_layout() {
        let layout = PreviewLayout::for_policy(CropPolicy::Portrait3x4, false);
        assert_eq!(layout.container.aspect_ratio, Some((3, 4)));
        assert!(layout.video.centered);
        assert!(layout.container_css().contains("aspect-ratio:3 / 4;"));
        assert!(layout.video_css().contains("transform:translateX(-50%);"));
    }

    #[test]
    fn test_mirrored_layouts() {
        let cropped = PreviewLayout::for_policy(CropPolicy::Portrait3x4, true);
        assert!(cropped
            .video_css()
            .contains("transform:translateX(-50%) rotateY(180deg);"));

        let filled = PreviewLayout::for_policy(CropPolicy::Fill, true);
        assert!(filled.video_css().contains("transform:rotateY(180deg);"));
    }

    #[test]
    fn test_fill_layout() {
        let layout = PreviewLayout::for_policy(CropPolicy::Fill, false);
        assert_eq!(layout.container.aspect_ratio, None);
        assert!(!layout.container.auto_height);
        assert!(layout.video_css().contains("transform:none;"));
    }
}
