//! In-memory platform objects for demos and tests.

use super::platform::{
    EntryPoint, ErrorCallback, LegacyVendor, LiveStream, MediaHost, PlatformError,
    SuccessCallback,
};
use super::sink::{PlaybackFlag, SinkError, VideoSink};
use crate::constraints::{FacingModeSupport, MediaConstraints};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A fake stream that records whether it was stopped.
#[derive(Debug, Clone)]
pub struct MockStream {
    serial: u32,
    stopped: Rc<Cell<bool>>,
}

impl MockStream {
    pub fn new(serial: u32) -> Self {
        Self {
            serial,
            stopped: Rc::new(Cell::new(false)),
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }
}

impl LiveStream for MockStream {
    fn id(&self) -> String {
        format!("mock-stream-{}", self.serial)
    }

    fn stop(&self) {
        self.stopped.set(true);
    }
}

/// Mock host with a configurable entry point and outcome.
#[derive(Debug)]
pub struct MockHost {
    entry: EntryPoint,
    facing: FacingModeSupport,
    user_agent: String,
    failure: Option<PlatformError>,
    requests: Cell<u32>,
    legacy_requests: Cell<u32>,
    last_vendor: Cell<Option<LegacyVendor>>,
    last_constraints: RefCell<Option<MediaConstraints>>,
}

impl MockHost {
    pub fn new(entry: EntryPoint) -> Self {
        Self {
            entry,
            facing: FacingModeSupport::Supported,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) MockHost/1.0".to_string(),
            failure: None,
            requests: Cell::new(0),
            legacy_requests: Cell::new(0),
            last_vendor: Cell::new(None),
            last_constraints: RefCell::new(None),
        }
    }

    pub fn with_facing_support(mut self, facing: FacingModeSupport) -> Self {
        self.facing = facing;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Every request is rejected with `error`.
    pub fn failing_with(mut self, error: PlatformError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Device requests made through any entry point.
    pub fn request_count(&self) -> u32 {
        self.requests.get()
    }

    pub fn legacy_request_count(&self) -> u32 {
        self.legacy_requests.get()
    }

    /// Vendor function the most recent legacy request went through.
    pub fn last_legacy_vendor(&self) -> Option<LegacyVendor> {
        self.last_vendor.get()
    }

    /// Constraints of the most recent request.
    pub fn last_constraints(&self) -> Option<MediaConstraints> {
        self.last_constraints.borrow().clone()
    }

    fn next_outcome(&self, constraints: &MediaConstraints) -> Result<MockStream, PlatformError> {
        let serial = self.requests.get() + 1;
        self.requests.set(serial);
        *self.last_constraints.borrow_mut() = Some(constraints.clone());

        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(MockStream::new(serial)),
        }
    }
}

impl MediaHost for MockHost {
    type Stream = MockStream;

    fn probe(&self) -> EntryPoint {
        self.entry
    }

    fn facing_mode_support(&self) -> FacingModeSupport {
        self.facing
    }

    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    async fn request_stream(
        &self,
        constraints: &MediaConstraints,
    ) -> Result<MockStream, PlatformError> {
        self.next_outcome(constraints)
    }

    fn request_stream_legacy(
        &self,
        vendor: LegacyVendor,
        constraints: &MediaConstraints,
        on_success: SuccessCallback<MockStream>,
        on_error: ErrorCallback,
    ) {
        self.legacy_requests.set(self.legacy_requests.get() + 1);
        self.last_vendor.set(Some(vendor));
        match self.next_outcome(constraints) {
            Ok(stream) => on_success(stream),
            Err(error) => on_error(error),
        }
    }

    fn create_object_url(&self, stream: &MockStream) -> Result<String, PlatformError> {
        Ok(format!("blob:mock/{}", stream.id()))
    }
}

/// Mock video element.
#[derive(Debug)]
pub struct MockSink {
    flags: Vec<PlaybackFlag>,
    src_object_supported: bool,
    source: Option<String>,
    loads_metadata: bool,
    play_error: Option<PlatformError>,
    playing: bool,
}

impl Default for MockSink {
    fn default() -> Self {
        Self {
            flags: Vec::new(),
            src_object_supported: true,
            source: None,
            loads_metadata: true,
            play_error: None,
            playing: false,
        }
    }
}

impl MockSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink from an engine without `srcObject`.
    pub fn without_src_object(mut self) -> Self {
        self.src_object_supported = false;
        self
    }

    /// A sink whose metadata never loads.
    pub fn never_loading(mut self) -> Self {
        self.loads_metadata = false;
        self
    }

    pub fn rejecting_play(mut self, error: PlatformError) -> Self {
        self.play_error = Some(error);
        self
    }

    pub fn flags(&self) -> &[PlaybackFlag] {
        &self.flags
    }

    /// Stream id or URL currently bound.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

impl VideoSink<MockStream> for MockSink {
    fn set_flag(&mut self, flag: PlaybackFlag) -> Result<(), SinkError> {
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
        Ok(())
    }

    fn supports_src_object(&self) -> bool {
        self.src_object_supported
    }

    fn set_src_object(&mut self, stream: &MockStream) {
        self.source = Some(stream.id());
    }

    fn set_src_url(&mut self, url: &str) {
        self.source = Some(url.to_string());
    }

    async fn loaded_metadata(&mut self) {
        if !self.loads_metadata {
            futures::future::pending::<()>().await;
        }
    }

    async fn play(&mut self) -> Result<(), PlatformError> {
        if let Some(error) = &self.play_error {
            return Err(error.clone());
        }
        self.playing = true;
        Ok(())
    }
}
