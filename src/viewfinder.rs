//! A camera component: one host, one set of options, one session.
//!
//! [`Viewfinder`] is a thin shell over the free functions in
//! [`crate::acquire`] and [`crate::capture`]. Its only state beyond the
//! options is the active session handle. Both the preview layout and every
//! capture read the same stored crop policy, so what the user sees is what
//! gets captured.

use crate::acquire::{self, MediaHost, PermissionState, Session, VideoSink};
use crate::capture::{
    capture_with_quality, CaptureError, CapturedImage, DrawBuffer, FrameSource, PreviewLayout,
    ViewportBox,
};
use crate::config::CameraOptions;
use crate::constraints::{DeviceClass, MediaConstraints};
use crate::error::Error;

/// A camera component bound to a media host.
pub struct Viewfinder<H: MediaHost> {
    host: H,
    options: CameraOptions,
    session: Session<H::Stream>,
    permission: Option<PermissionState>,
}

impl<H: MediaHost> Viewfinder<H> {
    /// Creates a component after validating `options`.
    pub fn new(host: H, options: CameraOptions) -> Result<Self, Error> {
        options.validate()?;
        Ok(Self {
            host,
            options,
            session: Session::new(),
            permission: None,
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn options(&self) -> &CameraOptions {
        &self.options
    }

    pub fn session(&self) -> &Session<H::Stream> {
        &self.session
    }

    /// Resolves the options against this host's device and capabilities.
    pub fn constraints(&self) -> Result<MediaConstraints, Error> {
        let device = DeviceClass::from_user_agent(&self.host.user_agent());
        let constraints = self
            .options
            .constraints(device, self.host.facing_mode_support())?;
        Ok(constraints)
    }

    /// Starts (or restarts) the camera into `sink`.
    ///
    /// Resolves once the first frame is playing. Any previous stream is
    /// stopped first.
    pub async fn start<K>(&mut self, sink: &mut K) -> Result<H::Stream, Error>
    where
        K: VideoSink<H::Stream>,
    {
        let constraints = self.constraints()?;
        let stream = acquire::acquire(&self.host, &constraints, sink, &mut self.session).await?;
        Ok(stream)
    }

    /// Stops the camera and releases the device.
    pub fn stop(&mut self) {
        self.session.stop();
    }

    /// Layout the preview must use for captures to match it.
    pub fn preview_layout(&self) -> PreviewLayout {
        PreviewLayout::for_policy(self.options.crop_to_fit, self.options.mirror_image)
    }

    /// Captures the visible part of the live preview.
    pub fn screenshot<V, B>(
        &self,
        video: Option<&V>,
        viewport: Option<&dyn ViewportBox>,
        buffer: Option<&mut B>,
    ) -> Result<CapturedImage, CaptureError>
    where
        V: FrameSource + ?Sized,
        B: DrawBuffer<V> + ?Sized,
    {
        capture_with_quality(
            video,
            viewport,
            buffer,
            self.options.crop_to_fit,
            self.options.jpeg_quality,
        )
    }

    /// Records a permission change. Returns true if the caller should
    /// call [`Viewfinder::start`] again.
    pub fn permission_changed(&mut self, state: PermissionState) -> bool {
        let previous = self.permission.replace(state);
        let reacquire = state.warrants_reacquire(previous) && !self.session.is_live();
        tracing::debug!(?previous, current = ?state, reacquire, "Camera permission changed");
        reacquire
    }
}
