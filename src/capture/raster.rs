//! In-memory capture backend built on the `image` crate.
//!
//! [`StillFrame`] stands in for a playing video element and [`RasterBuffer`]
//! for an off-screen canvas, so the capture path runs the same way outside
//! a browser.

use super::geometry::{FrameGeometry, Rect, Size};
use super::still::jpeg_data_uri;
use super::target::{CaptureError, DrawBuffer, FrameSource};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};

/// Default JPEG quality, matching the browser's `toDataURL` default of 0.92.
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// A single decoded video frame and the size it is displayed at.
#[derive(Debug, Clone)]
pub struct StillFrame {
    image: RgbaImage,
    rendered: Size,
}

impl StillFrame {
    pub fn new(image: RgbaImage, rendered: Size) -> Self {
        Self { image, rendered }
    }

    /// A gradient test pattern of the given native size.
    pub fn synthetic(native: Size, rendered: Size) -> Self {
        let image = RgbaImage::from_fn(native.width, native.height, |x, y| {
            let r = (x * 255 / native.width.max(1)) as u8;
            let g = (y * 255 / native.height.max(1)) as u8;
            Rgba([r, g, 128, 255])
        });
        Self::new(image, rendered)
    }

    #[inline]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

impl FrameSource for StillFrame {
    fn frame_geometry(&self) -> Option<FrameGeometry> {
        let geometry = FrameGeometry {
            native: Size::new(self.image.width(), self.image.height()),
            rendered: self.rendered,
        };
        geometry.is_drawable().then_some(geometry)
    }
}

/// An RGBA raster standing in for a canvas.
#[derive(Debug, Clone)]
pub struct RasterBuffer {
    pixels: RgbaImage,
    has_context: bool,
}

impl Default for RasterBuffer {
    fn default() -> Self {
        Self {
            pixels: RgbaImage::new(0, 0),
            has_context: true,
        }
    }
}

impl RasterBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer whose drawing context could not be obtained.
    pub fn without_context() -> Self {
        Self {
            has_context: false,
            ..Self::default()
        }
    }

    #[inline]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.pixels.width(), self.pixels.height())
    }
}

impl DrawBuffer<StillFrame> for RasterBuffer {
    fn has_context(&self) -> bool {
        self.has_context
    }

    fn resize(&mut self, size: Size) {
        self.pixels = RgbaImage::new(size.width, size.height);
    }

    fn draw(&mut self, source: &StillFrame, src: Rect, dest: Rect) -> Result<(), CaptureError> {
        let (native_w, native_h) = source.image.dimensions();

        // Clip to the frame; an empty intersection paints nothing, as a
        // canvas would.
        let x = src.x.min(native_w);
        let y = src.y.min(native_h);
        let width = src.width.min(native_w - x);
        let height = src.height.min(native_h - y);
        if width == 0 || height == 0 || dest.width == 0 || dest.height == 0 {
            tracing::debug!(?src, ?dest, "Source rectangle outside frame; nothing drawn");
            return Ok(());
        }

        let cropped = imageops::crop_imm(&source.image, x, y, width, height).to_image();
        let scaled = imageops::resize(&cropped, dest.width, dest.height, FilterType::Triangle);
        imageops::replace(&mut self.pixels, &scaled, i64::from(dest.x), i64::from(dest.y));
        Ok(())
    }

    fn encode_jpeg(&self, quality: u8) -> Result<String, CaptureError> {
        if self.pixels.width() == 0 || self.pixels.height() == 0 {
            return Err(CaptureError::Encode("buffer is empty".to_string()));
        }

        // JPEG has no alpha channel.
        let rgb = DynamicImage::ImageRgba8(self.pixels.clone()).to_rgb8();
        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, quality.clamp(1, 100))
            .encode_image(&rgb)
            .map_err(|e| CaptureError::Encode(e.to_string()))?;
        Ok(jpeg_data_uri(&jpeg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_crops_and_stretches() {
        // Left half red, right half blue.
        let image = RgbaImage::from_fn(4, 2, |x, _| {
            if x < 2 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });
        let frame = StillFrame::new(image, Size::new(4, 2));
        let mut buffer = RasterBuffer::new();
        buffer.resize(Size::new(8, 8));

        buffer
            .draw(&frame, Rect::new(2, 0, 2, 2), Rect::new(0, 0, 8, 8))
            .unwrap();

        assert_eq!(buffer.size(), Size::new(8, 8));
        assert!(buffer
            .pixels()
            .pixels()
            .all(|p| p.0[0] < 5 && p.0[2] > 250));
    }

    #[test]
    fn test_draw_outside_frame_is_noop() {
        let frame = StillFrame::synthetic(Size::new(4, 4), Size::new(4, 4));
        let mut buffer = RasterBuffer::new();
        buffer.resize(Size::new(2, 2));

        buffer
            .draw(&frame, Rect::new(10, 0, 2, 2), Rect::new(0, 0, 2, 2))
            .unwrap();
        assert!(buffer.pixels().pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn test_encode_produces_jpeg() {
        let frame = StillFrame::synthetic(Size::new(32, 24), Size::new(32, 24));
        let mut buffer = RasterBuffer::new();
        buffer.resize(Size::new(16, 12));
        buffer
            .draw(&frame, Rect::new(0, 0, 32, 24), Rect::new(0, 0, 16, 12))
            .unwrap();

        let uri = buffer.encode_jpeg(80).unwrap();
        assert!(uri.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_empty_buffer_fails_to_encode() {
        let buffer = RasterBuffer::new();
        assert!(matches!(buffer.encode_jpeg(DEFAULT_JPEG_QUALITY), Err(CaptureError::Encode(_))));
    }

    #[test]
    fn test_empty_frame_is_not_drawable() {
        let frame = StillFrame::new(RgbaImage::new(0, 0), Size::new(100, 100));
        assert!(frame.frame_geometry().is_none());
    }
}
