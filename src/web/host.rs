use super::{platform_error, property};
use crate::acquire::{
    EntryPoint, ErrorCallback, LegacyVendor, LiveStream, MediaHost, PlatformError,
    SuccessCallback,
};
use crate::constraints::{FacingModeSupport, MediaConstraints};
use js_sys::{Function, JSON};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    MediaDevices, MediaSource, MediaStream, MediaStreamConstraints, MediaStreamTrack,
    MediaTrackSupportedConstraints, Navigator, Url,
};

/// A browser `MediaStream`.
#[derive(Debug, Clone)]
pub struct WebStream(MediaStream);

impl WebStream {
    pub fn media_stream(&self) -> &MediaStream {
        &self.0
    }
}

impl LiveStream for WebStream {
    fn id(&self) -> String {
        self.0.id()
    }

    fn stop(&self) {
        self.0
            .get_tracks()
            .iter()
            .for_each(|track| MediaStreamTrack::from(track).stop());
    }
}

/// The current window's `navigator`.
#[derive(Debug, Clone)]
pub struct WebHost {
    navigator: Navigator,
}

impl WebHost {
    /// Binds to the global window. `None` outside a window context.
    pub fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        Some(Self::new(window.navigator()))
    }

    pub fn new(navigator: Navigator) -> Self {
        Self { navigator }
    }

    /// `navigator.mediaDevices`, absent on insecure origins and old engines.
    fn media_devices(&self) -> Option<MediaDevices> {
        property(&self.navigator, "mediaDevices")?;
        self.navigator.media_devices().ok()
    }

    fn supported_constraints(&self) -> Option<MediaTrackSupportedConstraints> {
        let devices = self.media_devices()?;
        property(&devices, "getSupportedConstraints")
            .filter(JsValue::is_function)
            .map(|_| devices.get_supported_constraints())
    }

    fn constraints_object(constraints: &MediaConstraints) -> Result<JsValue, PlatformError> {
        let json = constraints
            .to_json()
            .map_err(|e| PlatformError::new("TypeError", e.to_string()))?;
        JSON::parse(&json).map_err(|e| platform_error(&e))
    }
}

impl MediaHost for WebHost {
    type Stream = WebStream;

    fn probe(&self) -> EntryPoint {
        let modern = self
            .media_devices()
            .and_then(|devices| property(&devices, "getUserMedia"))
            .is_some_and(|f| f.is_function());
        if modern {
            return EntryPoint::Modern;
        }

        LegacyVendor::ALL
            .into_iter()
            .find(|vendor| {
                property(&self.navigator, vendor.function_name()).is_some_and(|f| f.is_function())
            })
            .map_or(EntryPoint::None, EntryPoint::Legacy)
    }

    fn facing_mode_support(&self) -> FacingModeSupport {
        let Some(supported) = self.supported_constraints() else {
            return FacingModeSupport::Unknown;
        };
        match property(&supported, "facingMode").and_then(|v| v.as_bool()) {
            Some(true) => FacingModeSupport::Supported,
            _ => FacingModeSupport::Unsupported,
        }
    }

    fn user_agent(&self) -> String {
        self.navigator.user_agent().unwrap_or_default()
    }

    async fn request_stream(
        &self,
        constraints: &MediaConstraints,
    ) -> Result<WebStream, PlatformError> {
        let devices = self
            .media_devices()
            .ok_or_else(|| PlatformError::new("NotSupportedError", "mediaDevices missing"))?;

        let request: MediaStreamConstraints =
            Self::constraints_object(constraints)?.unchecked_into();
        let promise = devices
            .get_user_media_with_constraints(&request)
            .map_err(|e| platform_error(&e))?;

        let stream = JsFuture::from(promise)
            .await
            .map_err(|e| platform_error(&e))?;
        Ok(WebStream(stream.unchecked_into()))
    }

    fn request_stream_legacy(
        &self,
        vendor: LegacyVendor,
        constraints: &MediaConstraints,
        on_success: SuccessCallback<WebStream>,
        on_error: ErrorCallback,
    ) {
        let function = property(&self.navigator, vendor.function_name())
            .and_then(|f| f.dyn_into::<Function>().ok());
        let (function, request) = match (function, Self::constraints_object(constraints)) {
            (Some(function), Ok(request)) => (function, request),
            (None, _) => {
                on_error(PlatformError::new(
                    "NotSupportedError",
                    format!("{} missing", vendor.function_name()),
                ));
                return;
            }
            (_, Err(error)) => {
                on_error(error);
                return;
            }
        };

        // The browser calls at most one of these, once. A synchronous throw
        // reports through the same error callback.
        let on_error = Rc::new(Cell::new(Some(on_error)));
        let rejected = Rc::clone(&on_error);
        let success = Closure::once_into_js(move |stream: JsValue| {
            on_success(WebStream(stream.unchecked_into()));
        });
        let failure = Closure::once_into_js(move |error: JsValue| {
            if let Some(on_error) = rejected.take() {
                on_error(platform_error(&error));
            }
        });

        if let Err(thrown) = function.call3(&self.navigator, &request, &success, &failure) {
            if let Some(on_error) = on_error.take() {
                on_error(platform_error(&thrown));
            }
        }
    }

    fn create_object_url(&self, stream: &WebStream) -> Result<String, PlatformError> {
        // Engines without srcObject accept a MediaStream here.
        Url::create_object_url_with_source(stream.0.unchecked_ref::<MediaSource>())
            .map_err(|e| platform_error(&e))
    }
}
