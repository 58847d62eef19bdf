use super::host::WebStream;
use super::platform_error;
use crate::acquire::{PlaybackFlag, PlatformError, SinkError, VideoSink};
use crate::capture::{FrameGeometry, FrameSource, Size, ViewportBox};
use futures::channel::oneshot;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, HtmlVideoElement};

/// `HAVE_METADATA`
const HAVE_METADATA: u16 = 1;
/// `HAVE_CURRENT_DATA`
const HAVE_CURRENT_DATA: u16 = 2;

/// A `<video>` element used as the preview sink.
#[derive(Debug, Clone)]
pub struct WebVideoSink {
    video: HtmlVideoElement,
}

impl WebVideoSink {
    pub fn new(video: HtmlVideoElement) -> Self {
        Self { video }
    }

    pub fn element(&self) -> &HtmlVideoElement {
        &self.video
    }
}

impl VideoSink<WebStream> for WebVideoSink {
    fn set_flag(&mut self, flag: PlaybackFlag) -> Result<(), SinkError> {
        match flag {
            PlaybackFlag::Autoplay => self.video.set_autoplay(true),
            PlaybackFlag::Muted => self.video.set_muted(true),
            PlaybackFlag::PlaysInline => {
                // No typed setter; older WebKit only reads the attribute.
                self.video
                    .set_attribute(flag.attribute(), "")
                    .map_err(|e| SinkError::Flag {
                        flag,
                        reason: platform_error(&e).to_string(),
                    })?;
            }
        }
        Ok(())
    }

    fn supports_src_object(&self) -> bool {
        js_sys::Reflect::has(&self.video, &JsValue::from_str("srcObject")).unwrap_or(false)
    }

    fn set_src_object(&mut self, stream: &WebStream) {
        self.video.set_src_object(Some(stream.media_stream()));
    }

    fn set_src_url(&mut self, url: &str) {
        self.video.set_src(url);
    }

    async fn loaded_metadata(&mut self) {
        if self.video.ready_state() >= HAVE_METADATA {
            return;
        }

        let (tx, rx) = oneshot::channel::<()>();
        let handler = Closure::once_into_js(move || {
            let _ = tx.send(());
        });
        self.video.set_onloadedmetadata(Some(handler.unchecked_ref()));

        let loaded = rx.await.is_ok();
        self.video.set_onloadedmetadata(None);
        if !loaded {
            futures::future::pending::<()>().await;
        }
    }

    async fn play(&mut self) -> Result<(), PlatformError> {
        let promise = self.video.play().map_err(|e| platform_error(&e))?;
        JsFuture::from(promise)
            .await
            .map_err(|e| platform_error(&e))?;
        Ok(())
    }
}

impl FrameSource for WebVideoSink {
    fn frame_geometry(&self) -> Option<FrameGeometry> {
        if self.video.ready_state() < HAVE_CURRENT_DATA {
            return None;
        }
        let geometry = FrameGeometry {
            native: Size::new(self.video.video_width(), self.video.video_height()),
            rendered: Size::new(
                self.video.client_width().max(0) as u32,
                self.video.client_height().max(0) as u32,
            ),
        };
        geometry.is_drawable().then_some(geometry)
    }
}

/// The element bounding the preview.
#[derive(Debug, Clone)]
pub struct WebContainer {
    element: Element,
}

impl WebContainer {
    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

impl ViewportBox for WebContainer {
    fn rendered_size(&self) -> Size {
        Size::new(
            self.element.client_width().max(0) as u32,
            self.element.client_height().max(0) as u32,
        )
    }
}
