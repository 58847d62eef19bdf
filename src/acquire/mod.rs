//! Stream acquisition.
//!
//! Probes the host for a camera-access entry point, normalizes it,
//! requests a stream, binds it to a video sink and waits until the first
//! frame is actually playing. Acquisition is the only suspending step of
//! the camera pipeline; it is never retried here.
//!
//! ```text
//! probe → normalize → prepare sink → request → attach → metadata → play
//! ```

mod adapter;
mod mock;
mod permission;
mod platform;
mod session;
mod sink;

pub use adapter::{install_legacy_shim, legacy_shim, UserMedia};
pub use mock::{MockHost, MockSink, MockStream};
pub use permission::PermissionState;
pub use platform::{
    EntryPoint, ErrorCallback, LegacyVendor, LiveStream, MediaHost, PlatformError,
    SuccessCallback,
};
pub use session::{Session, SessionState};
pub use sink::{Attachment, PlaybackFlag, SinkError, VideoSink};

use crate::constraints::MediaConstraints;
use thiserror::Error;

/// Acquisition failures. Each carries the underlying cause.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcquireError {
    #[error("your browser does not support camera access")]
    UnsupportedEnvironment,
    #[error("camera permission denied: {0}")]
    PermissionDenied(PlatformError),
    #[error("camera unavailable: {0}")]
    DeviceUnavailable(PlatformError),
    #[error("video sink unavailable: {0}")]
    SinkUnavailable(#[from] SinkError),
}

impl AcquireError {
    /// Sorts a platform rejection into permission or device failures.
    pub fn from_platform(error: PlatformError) -> Self {
        if error.is_permission_denial() {
            AcquireError::PermissionDenied(error)
        } else {
            AcquireError::DeviceUnavailable(error)
        }
    }

    /// Whether re-issuing acquisition in the same environment can succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, AcquireError::UnsupportedEnvironment)
    }
}

/// Acquires a stream into `sink` and waits for playback.
///
/// The session moves to `Acquiring` immediately, then to `Live` only after
/// the sink reports loaded metadata and playback has started. If metadata
/// never loads, the returned future never completes. The session holds the
/// stream as soon as it is granted, so dropping the future and calling
/// [`Session::stop`] releases the device. Callers must not run two
/// acquisitions against the same sink concurrently.
pub async fn acquire<H, K>(
    host: &H,
    constraints: &MediaConstraints,
    sink: &mut K,
    session: &mut Session<H::Stream>,
) -> Result<H::Stream, AcquireError>
where
    H: MediaHost,
    K: VideoSink<H::Stream>,
{
    session.begin();

    match run(host, constraints, sink, session).await {
        Ok((stream, attachment)) => {
            session.go_live(stream.clone(), attachment);
            Ok(stream)
        }
        Err(error) => {
            session.fail(error.clone());
            Err(error)
        }
    }
}

async fn run<H, K>(
    host: &H,
    constraints: &MediaConstraints,
    sink: &mut K,
    session: &mut Session<H::Stream>,
) -> Result<(H::Stream, Attachment), AcquireError>
where
    H: MediaHost,
    K: VideoSink<H::Stream>,
{
    let media = UserMedia::probe(host)?;
    tracing::debug!(legacy = media.is_legacy(), "Camera entry point found");

    sink::prepare::<H::Stream, K>(sink)?;

    let stream = media
        .request_stream(constraints)
        .await
        .map_err(AcquireError::from_platform)?;
    tracing::debug!(stream = %stream.id(), "Stream granted");

    // From here on the device is held by the session; failing releases it.
    session.hold(stream.clone());

    let attachment = sink::attach(sink, &stream, |s| host.create_object_url(s))
        .map_err(AcquireError::from_platform)?;

    sink.loaded_metadata().await;
    tracing::debug!(stream = %stream.id(), "Stream metadata loaded");

    sink.play().await.map_err(AcquireError::from_platform)?;

    Ok((stream, attachment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{resolve, DeviceClass, FacingModeSupport};
    use futures::executor::block_on;
    use futures::FutureExt;

    fn constraints() -> MediaConstraints {
        resolve(None, None, None, DeviceClass::Desktop, FacingModeSupport::Supported).unwrap()
    }

    #[test]
    fn test_acquire_goes_live() {
        let host = MockHost::new(EntryPoint::Modern);
        let mut sink = MockSink::new();
        let mut session = Session::new();

        let stream = block_on(acquire(&host, &constraints(), &mut sink, &mut session)).unwrap();

        assert!(session.is_live());
        assert_eq!(session.stream().map(|s| s.id()), Some(stream.id()));
        assert_eq!(session.attachment(), Some(&Attachment::SrcObject));
        assert!(sink.is_playing());
        assert_eq!(sink.flags(), &PlaybackFlag::REQUIRED);
        assert_eq!(sink.source(), Some("mock-stream-1"));
        assert_eq!(host.last_constraints(), Some(constraints()));
    }

    #[test]
    fn test_no_entry_point_skips_device_call() {
        let host = MockHost::new(EntryPoint::None);
        let mut sink = MockSink::new();
        let mut session = Session::new();

        let result = block_on(acquire(&host, &constraints(), &mut sink, &mut session));

        assert_eq!(result.unwrap_err(), AcquireError::UnsupportedEnvironment);
        assert_eq!(host.request_count(), 0);
        assert!(sink.flags().is_empty());
        assert_eq!(
            session.state(),
            &SessionState::Failed(AcquireError::UnsupportedEnvironment)
        );
    }

    #[test]
    fn test_metadata_never_loads_never_goes_live() {
        let host = MockHost::new(EntryPoint::Modern);
        let mut sink = MockSink::new().never_loading();
        let mut session = Session::new();

        let outcome = acquire(&host, &constraints(), &mut sink, &mut session).now_or_never();
        assert!(outcome.is_none());
        assert_eq!(session.state(), &SessionState::Acquiring);
        assert!(!sink.is_playing());
    }

    #[test]
    fn test_stop_after_abandoned_acquire_releases_device() {
        let host = MockHost::new(EntryPoint::Modern);
        let mut sink = MockSink::new().never_loading();
        let mut session = Session::new();

        let outcome = acquire(&host, &constraints(), &mut sink, &mut session).now_or_never();
        assert!(outcome.is_none());
        assert_eq!(host.request_count(), 1);
        assert_eq!(sink.source(), Some("mock-stream-1"));

        let stream = session.stream().cloned().unwrap();
        assert!(!stream.is_stopped());

        session.stop();
        assert!(stream.is_stopped());
        assert!(session.stream().is_none());
        assert_eq!(session.state(), &SessionState::Unstarted);
    }

    #[test]
    fn test_restart_after_abandoned_acquire_releases_device() {
        let host = MockHost::new(EntryPoint::Modern);
        let mut stuck = MockSink::new().never_loading();
        let mut session = Session::new();

        assert!(acquire(&host, &constraints(), &mut stuck, &mut session)
            .now_or_never()
            .is_none());
        let abandoned = session.stream().cloned().unwrap();

        let mut sink = MockSink::new();
        let live = block_on(acquire(&host, &constraints(), &mut sink, &mut session)).unwrap();
        assert!(abandoned.is_stopped());
        assert!(!live.is_stopped());
    }

    #[test]
    fn test_permission_denied() {
        let host = MockHost::new(EntryPoint::Modern)
            .failing_with(PlatformError::new("NotAllowedError", "Permission denied"));
        let mut sink = MockSink::new();
        let mut session = Session::new();

        let err = block_on(acquire(&host, &constraints(), &mut sink, &mut session)).unwrap_err();
        assert!(matches!(err, AcquireError::PermissionDenied(ref cause) if cause.name == "NotAllowedError"));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_device_busy() {
        let host = MockHost::new(EntryPoint::Modern)
            .failing_with(PlatformError::new("NotReadableError", "Device in use"));
        let mut sink = MockSink::new();
        let mut session = Session::new();

        let err = block_on(acquire(&host, &constraints(), &mut sink, &mut session)).unwrap_err();
        assert!(matches!(err, AcquireError::DeviceUnavailable(_)));
    }

    #[test]
    fn test_blob_url_fallback() {
        let host = MockHost::new(EntryPoint::Modern);
        let mut sink = MockSink::new().without_src_object();
        let mut session = Session::new();

        block_on(acquire(&host, &constraints(), &mut sink, &mut session)).unwrap();

        assert_eq!(sink.source(), Some("blob:mock/mock-stream-1"));
        assert_eq!(
            session.attachment(),
            Some(&Attachment::ObjectUrl("blob:mock/mock-stream-1".to_string()))
        );
    }

    #[test]
    fn test_play_rejection_releases_stream() {
        let host = MockHost::new(EntryPoint::Modern);
        let mut sink =
            MockSink::new().rejecting_play(PlatformError::new("NotAllowedError", "autoplay"));
        let mut session = Session::new();

        let err = block_on(acquire(&host, &constraints(), &mut sink, &mut session)).unwrap_err();
        assert!(matches!(err, AcquireError::PermissionDenied(_)));
        assert!(session.stream().is_none());
    }

    #[test]
    fn test_retry_after_failure() {
        let failing = MockHost::new(EntryPoint::Modern)
            .failing_with(PlatformError::new("NotAllowedError", ""));
        let host = MockHost::new(EntryPoint::Modern);
        let mut sink = MockSink::new();
        let mut session = Session::new();

        assert!(block_on(acquire(&failing, &constraints(), &mut sink, &mut session)).is_err());
        assert!(block_on(acquire(&host, &constraints(), &mut sink, &mut session)).is_ok());
        assert!(session.is_live());
        assert_eq!(session.attempts(), 2);
    }

    #[test]
    fn test_legacy_host_goes_live() {
        let host = MockHost::new(EntryPoint::Legacy(LegacyVendor::Webkit));
        let mut sink = MockSink::new();
        let mut session = Session::new();

        block_on(acquire(&host, &constraints(), &mut sink, &mut session)).unwrap();
        assert!(session.is_live());
        assert_eq!(host.legacy_request_count(), 1);
    }
}
