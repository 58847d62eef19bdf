//! The video element a stream is played into.

use super::platform::PlatformError;
use std::fmt;

/// Element flags required for unattended playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackFlag {
    Autoplay,
    Muted,
    PlaysInline,
}

impl PlaybackFlag {
    /// Every flag a sink needs before attachment.
    pub const REQUIRED: [PlaybackFlag; 3] = [
        PlaybackFlag::Autoplay,
        PlaybackFlag::Muted,
        PlaybackFlag::PlaysInline,
    ];

    /// HTML attribute name.
    pub fn attribute(&self) -> &'static str {
        match self {
            PlaybackFlag::Autoplay => "autoplay",
            PlaybackFlag::Muted => "muted",
            PlaybackFlag::PlaysInline => "playsinline",
        }
    }
}

impl fmt::Display for PlaybackFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute())
    }
}

/// How a stream ended up bound to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment {
    /// Assigned directly through `srcObject`.
    SrcObject,
    /// Assigned through `src` with a blob URL.
    ObjectUrl(String),
}

/// Errors configuring the sink element.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SinkError {
    #[error("failed to set {flag} on video element: {reason}")]
    Flag { flag: PlaybackFlag, reason: String },
    #[error("video element detached")]
    Detached,
}

/// A playable video element.
#[allow(async_fn_in_trait)]
pub trait VideoSink<S> {
    fn set_flag(&mut self, flag: PlaybackFlag) -> Result<(), SinkError>;

    /// Whether the element accepts a stream object directly.
    fn supports_src_object(&self) -> bool;

    fn set_src_object(&mut self, stream: &S);

    fn set_src_url(&mut self, url: &str);

    /// Completes once the element reports loaded metadata. Never completes
    /// if the event never fires.
    async fn loaded_metadata(&mut self);

    /// Starts playback and completes once it has begun.
    async fn play(&mut self) -> Result<(), PlatformError>;
}

/// Configures the sink for silent inline autoplay.
pub fn prepare<S, K: VideoSink<S>>(sink: &mut K) -> Result<(), SinkError> {
    for flag in PlaybackFlag::REQUIRED {
        sink.set_flag(flag)?;
    }
    Ok(())
}

/// Binds a stream to the sink through whichever mechanism it supports.
pub fn attach<S, K: VideoSink<S>>(
    sink: &mut K,
    stream: &S,
    object_url: impl FnOnce(&S) -> Result<String, PlatformError>,
) -> Result<Attachment, PlatformError> {
    if sink.supports_src_object() {
        sink.set_src_object(stream);
        Ok(Attachment::SrcObject)
    } else {
        // Older engines only take a URL.
        let url = object_url(stream)?;
        sink.set_src_url(&url);
        Ok(Attachment::ObjectUrl(url))
    }
}
