//! The binding between a live stream and its sink.

use super::platform::LiveStream;
use super::sink::Attachment;
use super::AcquireError;
use chrono::{DateTime, Utc};

/// Lifecycle of a session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Unstarted,
    Acquiring,
    Live,
    /// Terminal until the next acquisition attempt.
    Failed(AcquireError),
}

/// The one active stream binding of a camera component.
///
/// A session is an explicit handle passed to [`super::acquire`]; the
/// acquisition functions themselves keep no state. Beginning a new
/// acquisition stops whatever stream the session held before.
#[derive(Debug)]
pub struct Session<S: LiveStream> {
    state: SessionState,
    stream: Option<S>,
    attachment: Option<Attachment>,
    live_since: Option<DateTime<Utc>>,
    attempts: u32,
}

impl<S: LiveStream> Default for Session<S> {
    fn default() -> Self {
        Self {
            state: SessionState::Unstarted,
            stream: None,
            attachment: None,
            live_since: None,
            attempts: 0,
        }
    }
}

impl<S: LiveStream> Session<S> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        matches!(self.state, SessionState::Live)
    }

    /// The stream held by this session, from the moment it is granted.
    pub fn stream(&self) -> Option<&S> {
        self.stream.as_ref()
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// When playback started.
    pub fn live_since(&self) -> Option<DateTime<Utc>> {
        self.live_since
    }

    /// Number of acquisition attempts made on this session.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Enters `Acquiring`, tearing down any previous binding.
    pub(crate) fn begin(&mut self) {
        self.release();
        self.attempts += 1;
        self.state = SessionState::Acquiring;
        tracing::debug!(attempt = self.attempts, "Session acquiring");
    }

    /// Takes ownership of a granted stream while still `Acquiring`.
    pub(crate) fn hold(&mut self, stream: S) {
        self.stream = Some(stream);
    }

    pub(crate) fn go_live(&mut self, stream: S, attachment: Attachment) {
        tracing::info!(stream = %stream.id(), attachment = ?attachment, "Session live");
        self.stream = Some(stream);
        self.attachment = Some(attachment);
        self.live_since = Some(Utc::now());
        self.state = SessionState::Live;
    }

    pub(crate) fn fail(&mut self, error: AcquireError) {
        tracing::warn!(error = %error, "Session failed");
        self.release();
        self.state = SessionState::Failed(error);
    }

    /// Stops the stream and returns to `Unstarted`.
    pub fn stop(&mut self) {
        self.release();
        self.state = SessionState::Unstarted;
    }

    fn release(&mut self) {
        if let Some(stream) = self.stream.take() {
            tracing::info!(stream = %stream.id(), "Stopping stream tracks");
            stream.stop();
        }
        self.attachment = None;
        self.live_since = None;
    }
}
