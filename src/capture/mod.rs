//! Still capture and crop geometry.
//!
//! A capture sizes the drawing buffer to the viewport's rendered box,
//! samples the region of the live frame the user can actually see, paints
//! it into the buffer and encodes the buffer as a JPEG data URI. The crop
//! policy must be the one the preview is laid out with.

mod geometry;
mod policy;
mod raster;
mod still;
mod target;

pub use geometry::{plan_crop, CropPlan, FrameGeometry, Rect, Size};
pub use policy::{ContainerLayout, CropPolicy, PreviewLayout, VideoLayout};
pub use raster::{RasterBuffer, StillFrame, DEFAULT_JPEG_QUALITY};
pub use still::{jpeg_data_uri, CapturedImage, JPEG_DATA_URI_PREFIX};
pub use target::{CaptureError, CaptureTarget, DrawBuffer, FrameSource, ViewportBox};

/// Captures what is currently visible in the viewport.
///
/// Missing or unready handles are reported as
/// [`CaptureError::TargetMissing`], checked in order: video sink, its
/// frame, drawing buffer, drawing context, viewport, viewport size.
pub fn capture<V, B>(
    video: Option<&V>,
    viewport: Option<&dyn ViewportBox>,
    buffer: Option<&mut B>,
    policy: CropPolicy,
) -> Result<CapturedImage, CaptureError>
where
    V: FrameSource + ?Sized,
    B: DrawBuffer<V> + ?Sized,
{
    capture_with_quality(video, viewport, buffer, policy, DEFAULT_JPEG_QUALITY)
}

/// [`capture`] with an explicit JPEG quality (1-100).
pub fn capture_with_quality<V, B>(
    video: Option<&V>,
    viewport: Option<&dyn ViewportBox>,
    buffer: Option<&mut B>,
    policy: CropPolicy,
    quality: u8,
) -> Result<CapturedImage, CaptureError>
where
    V: FrameSource + ?Sized,
    B: DrawBuffer<V> + ?Sized,
{
    let video = video.ok_or(CaptureError::TargetMissing(CaptureTarget::VideoSink))?;
    let frame = video
        .frame_geometry()
        .filter(FrameGeometry::is_drawable)
        .ok_or(CaptureError::TargetMissing(CaptureTarget::VideoFrame))?;

    let buffer = buffer.ok_or(CaptureError::TargetMissing(CaptureTarget::DrawBuffer))?;
    if !buffer.has_context() {
        return Err(CaptureError::TargetMissing(CaptureTarget::DrawContext));
    }

    let viewport = viewport
        .ok_or(CaptureError::TargetMissing(CaptureTarget::Viewport))?
        .rendered_size();
    if viewport.is_empty() {
        return Err(CaptureError::TargetMissing(CaptureTarget::ViewportSize));
    }

    let plan = plan_crop(policy, frame, viewport);
    if plan.clamped {
        tracing::warn!(
            container_width = viewport.width,
            rendered_width = frame.rendered.width,
            "Container wider than rendered video; crop start clamped to 0"
        );
    }
    tracing::debug!(%policy, ?plan, "Capturing still");

    buffer.resize(plan.buffer);
    buffer.draw(video, plan.source, plan.dest)?;
    let data_uri = buffer.encode_jpeg(quality)?;

    Ok(CapturedImage::new(data_uri, plan.buffer, plan.clamped))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> StillFrame {
        StillFrame::synthetic(Size::new(400, 400), Size::new(400, 400))
    }

    #[test]
    fn test_capture_fill() {
        let video = frame();
        let mut buffer = RasterBuffer::new();
        let viewport = Size::new(320, 240);

        let image = capture(Some(&video), Some(&viewport), Some(&mut buffer), CropPolicy::Fill)
            .unwrap();

        assert_eq!(image.size(), viewport);
        assert_eq!(buffer.size(), viewport);
        assert!(image.data_uri().starts_with(JPEG_DATA_URI_PREFIX));
        assert!(!image.is_degraded());
    }

    #[test]
    fn test_capture_portrait() {
        let video = frame();
        let mut buffer = RasterBuffer::new();
        let viewport = Size::new(300, 400);

        let image = capture(
            Some(&video),
            Some(&viewport),
            Some(&mut buffer),
            CropPolicy::Portrait3x4,
        )
        .unwrap();

        assert_eq!(image.size(), Size::new(300, 400));
        let jpeg = image.jpeg_bytes().unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_missing_container() {
        let video = frame();
        let mut buffer = RasterBuffer::new();

        let result = capture(Some(&video), None, Some(&mut buffer), CropPolicy::Fill);
        assert_eq!(
            result.unwrap_err(),
            CaptureError::TargetMissing(CaptureTarget::Viewport)
        );
    }

    #[test]
    fn test_zero_sized_container() {
        let video = frame();
        let mut buffer = RasterBuffer::new();
        let viewport = Size::new(0, 400);

        let err = capture(Some(&video), Some(&viewport), Some(&mut buffer), CropPolicy::Fill)
            .unwrap_err();
        assert_eq!(err, CaptureError::TargetMissing(CaptureTarget::ViewportSize));
        assert!(err.is_transient());
    }

    #[test]
    fn test_missing_video_and_buffer() {
        let viewport = Size::new(300, 400);
        let mut buffer = RasterBuffer::new();

        let err = capture::<StillFrame, RasterBuffer>(
            None,
            Some(&viewport),
            Some(&mut buffer),
            CropPolicy::Fill,
        )
        .unwrap_err();
        assert_eq!(err, CaptureError::TargetMissing(CaptureTarget::VideoSink));

        let video = frame();
        let err = capture::<StillFrame, RasterBuffer>(
            Some(&video),
            Some(&viewport),
            None,
            CropPolicy::Fill,
        )
        .unwrap_err();
        assert_eq!(err, CaptureError::TargetMissing(CaptureTarget::DrawBuffer));
    }

    #[test]
    fn test_frame_not_ready() {
        let video = StillFrame::synthetic(Size::new(0, 0), Size::new(0, 0));
        let mut buffer = RasterBuffer::new();
        let viewport = Size::new(300, 400);

        let err = capture(Some(&video), Some(&viewport), Some(&mut buffer), CropPolicy::Fill)
            .unwrap_err();
        assert_eq!(err, CaptureError::TargetMissing(CaptureTarget::VideoFrame));
    }

    #[test]
    fn test_missing_context() {
        let video = frame();
        let mut buffer = RasterBuffer::without_context();
        let viewport = Size::new(300, 400);

        let err = capture(Some(&video), Some(&viewport), Some(&mut buffer), CropPolicy::Fill)
            .unwrap_err();
        assert_eq!(err, CaptureError::TargetMissing(CaptureTarget::DrawContext));
    }

    #[test]
    fn test_wide_container_is_degraded() {
        let video = StillFrame::synthetic(Size::new(400, 300), Size::new(400, 300));
        let mut buffer = RasterBuffer::new();
        let viewport = Size::new(500, 300);

        let image = capture(
            Some(&video),
            Some(&viewport),
            Some(&mut buffer),
            CropPolicy::Portrait3x4,
        )
        .unwrap();
        assert!(image.is_degraded());
    }
}
