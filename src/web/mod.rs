//! Browser backend.
//!
//! Implements the platform traits over `web-sys`: [`WebHost`] for
//! `navigator`, [`WebVideoSink`] for a `<video>` element, [`WebContainer`]
//! for the preview container and [`CanvasBuffer`] for an off-screen
//! `<canvas>`.

mod canvas;
mod host;
mod video;

pub use canvas::CanvasBuffer;
pub use host::{WebHost, WebStream};
pub use video::{WebContainer, WebVideoSink};

use crate::acquire::PlatformError;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::DomException;

/// Converts a thrown or rejected value into a [`PlatformError`].
///
/// Legacy entry points reject with plain objects carrying `name`, so those
/// are read by reflection when the value is not a `DOMException`.
pub(crate) fn platform_error(value: &JsValue) -> PlatformError {
    if let Some(exception) = value.dyn_ref::<DomException>() {
        return PlatformError::new(exception.name(), exception.message());
    }

    let field = |key: &str| {
        js_sys::Reflect::get(value, &JsValue::from_str(key))
            .ok()
            .and_then(|v| v.as_string())
    };
    match field("name") {
        Some(name) => PlatformError::new(name, field("message").unwrap_or_default()),
        None => PlatformError::new("Error", format!("{value:?}")),
    }
}

/// Reads `key` from `target`, treating `undefined` and `null` as absent.
pub(crate) fn property(target: &JsValue, key: &str) -> Option<JsValue> {
    js_sys::Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}
