//! Handles the capture engine draws from and into.

use super::geometry::{FrameGeometry, Rect, Size};
use std::fmt;
use thiserror::Error;

/// A video element that may hold a drawable frame.
pub trait FrameSource {
    /// Native and rendered frame size, or `None` if no frame is available.
    fn frame_geometry(&self) -> Option<FrameGeometry>;
}

/// The element whose rendered box bounds the preview.
pub trait ViewportBox {
    fn rendered_size(&self) -> Size;
}

/// An off-screen raster buffer that frames of `S` can be painted into.
pub trait DrawBuffer<S: ?Sized> {
    /// Whether a 2-D drawing context is available.
    fn has_context(&self) -> bool;

    fn resize(&mut self, size: Size);

    /// Samples `src` from the source's native frame and paints it,
    /// stretched, into `dest`.
    fn draw(&mut self, source: &S, src: Rect, dest: Rect) -> Result<(), CaptureError>;

    /// Encodes the buffer as a `data:image/jpeg;base64,` URI at the given
    /// quality (1-100).
    fn encode_jpeg(&self, quality: u8) -> Result<String, CaptureError>;
}

/// Which handle a capture was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureTarget {
    VideoSink,
    /// The sink exists but holds no drawable frame yet.
    VideoFrame,
    DrawBuffer,
    DrawContext,
    Viewport,
    /// The viewport exists but has not been laid out.
    ViewportSize,
}

impl fmt::Display for CaptureTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CaptureTarget::VideoSink => "video element",
            CaptureTarget::VideoFrame => "video frame",
            CaptureTarget::DrawBuffer => "canvas",
            CaptureTarget::DrawContext => "canvas 2d context",
            CaptureTarget::Viewport => "container",
            CaptureTarget::ViewportSize => "container size",
        };
        f.write_str(name)
    }
}

/// Errors that can occur during still capture.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("capture target missing: {0}")]
    TargetMissing(CaptureTarget),
    #[error("failed to draw frame: {0}")]
    Draw(String),
    #[error("failed to encode capture: {0}")]
    Encode(String),
}

impl CaptureError {
    /// True if the capture may succeed once layout has settled.
    pub fn is_transient(&self) -> bool {
        matches!(self, CaptureError::TargetMissing(_))
    }
}

impl ViewportBox for Size {
    fn rendered_size(&self) -> Size {
        *self
    }
}
