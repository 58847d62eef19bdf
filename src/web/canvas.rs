use super::platform_error;
use super::video::WebVideoSink;
use crate::capture::{CaptureError, DrawBuffer, Rect, Size, JPEG_DATA_URI_PREFIX};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// An off-screen `<canvas>` used as the capture buffer.
#[derive(Debug, Clone)]
pub struct CanvasBuffer {
    canvas: HtmlCanvasElement,
    context: Option<CanvasRenderingContext2d>,
}

impl CanvasBuffer {
    /// Wraps `canvas`, acquiring its 2-D context if available.
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());
        Self { canvas, context }
    }

    /// Creates a detached canvas in the current document.
    pub fn create() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let canvas = document
            .create_element("canvas")
            .ok()?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        Some(Self::new(canvas))
    }

    pub fn element(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl DrawBuffer<WebVideoSink> for CanvasBuffer {
    fn has_context(&self) -> bool {
        self.context.is_some()
    }

    fn resize(&mut self, size: Size) {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
    }

    fn draw(&mut self, source: &WebVideoSink, src: Rect, dest: Rect) -> Result<(), CaptureError> {
        let context = self
            .context
            .as_ref()
            .ok_or_else(|| CaptureError::Draw("no 2d context".to_string()))?;

        context
            .draw_image_with_html_video_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                source.element(),
                f64::from(src.x),
                f64::from(src.y),
                f64::from(src.width),
                f64::from(src.height),
                f64::from(dest.x),
                f64::from(dest.y),
                f64::from(dest.width),
                f64::from(dest.height),
            )
            .map_err(|e| CaptureError::Draw(platform_error(&e).to_string()))
    }

    fn encode_jpeg(&self, quality: u8) -> Result<String, CaptureError> {
        let quality = f64::from(quality.clamp(1, 100)) / 100.0;
        let uri = self
            .canvas
            .to_data_url_with_type_and_encoder_options("image/jpeg", &JsValue::from_f64(quality))
            .map_err(|e| CaptureError::Encode(platform_error(&e).to_string()))?;

        // Browsers fall back to PNG when JPEG encoding is unavailable.
        if !uri.starts_with(JPEG_DATA_URI_PREFIX) {
            return Err(CaptureError::Encode(format!(
                "canvas produced {}",
                uri.split(',').next().unwrap_or_default()
            )));
        }
        Ok(uri)
    }
}
