//! Crop geometry between the live frame and the capture buffer.
//!
//! Cropping decisions are made in on-screen terms (how much of the
//! displayed video the container hides) but sampling happens in the
//! frame's native pixels. The ratio between native and rendered video
//! width converts one into the other.

use super::policy::CropPolicy;
use serde::Serialize;

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// An axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle anchored at the origin.
    pub const fn of_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// The live frame's native size and its size as displayed on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameGeometry {
    pub native: Size,
    pub rendered: Size,
}

impl FrameGeometry {
    /// Native pixels per displayed pixel, measured horizontally.
    pub fn native_per_rendered(&self) -> f64 {
        f64::from(self.native.width) / f64::from(self.rendered.width)
    }

    /// Whether a frame can be sampled at all.
    pub fn is_drawable(&self) -> bool {
        !self.native.is_empty() && self.rendered.width > 0
    }
}

/// Where to sample the frame and where to paint it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CropPlan {
    /// Capture buffer size; always the viewport's rendered size.
    pub buffer: Size,
    /// Rectangle in native frame pixels.
    pub source: Rect,
    /// Rectangle in buffer pixels; always the whole buffer.
    pub dest: Rect,
    /// Set when the computed crop start fell left of the frame and was
    /// clamped to zero. The capture is degraded.
    pub clamped: bool,
}

/// Computes the crop plan for one capture.
///
/// With [`CropPolicy::Fill`] the whole frame is stretched onto the buffer.
/// With [`CropPolicy::Portrait3x4`] the video is assumed to be horizontally
/// centered behind a narrower container of equal height, so equal slivers
/// are trimmed from both sides and nothing is trimmed vertically.
pub fn plan_crop(policy: CropPolicy, frame: FrameGeometry, viewport: Size) -> CropPlan {
    let dest = Rect::of_size(viewport);

    match policy {
        CropPolicy::Fill => CropPlan {
            buffer: viewport,
            source: Rect::of_size(frame.native),
            dest,
            clamped: false,
        },
        CropPolicy::Portrait3x4 => {
            let ratio = frame.native_per_rendered();
            let hidden = f64::from(frame.rendered.width) - f64::from(viewport.width);
            let start_x = (hidden / 2.0 * ratio).floor();
            let clamped = start_x < 0.0;

            CropPlan {
                buffer: viewport,
                source: Rect::new(
                    if clamped { 0 } else { start_x as u32 },
                    0,
                    (f64::from(viewport.width) * ratio).floor() as u32,
                    (f64::from(viewport.height) * ratio).floor() as u32,
                ),
                dest,
                clamped,
            }
        }
    }
}
