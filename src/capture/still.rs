//! Captured still images.

use super::geometry::Size;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};

/// Prefix of every payload produced by the engine.
pub const JPEG_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// A captured JPEG still, encoded as a data URI.
///
/// Produced per capture and handed to the caller; the engine keeps no copy.
#[derive(Clone)]
pub struct CapturedImage {
    data_uri: String,
    size: Size,
    captured_at: DateTime<Utc>,
    /// The crop start had to be clamped.
    degraded: bool,
}

impl CapturedImage {
    pub(crate) fn new(data_uri: String, size: Size, degraded: bool) -> Self {
        Self {
            data_uri,
            size,
            captured_at: Utc::now(),
            degraded,
        }
    }

    /// The `data:image/jpeg;base64,...` payload.
    #[inline]
    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    pub fn into_data_uri(self) -> String {
        self.data_uri
    }

    /// Pixel size of the image, equal to the viewport at capture time.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// True when the capture geometry fell outside the frame and was clamped.
    #[inline]
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Decodes the payload back to raw JPEG bytes.
    pub fn jpeg_bytes(&self) -> Option<Vec<u8>> {
        let encoded = self.data_uri.strip_prefix(JPEG_DATA_URI_PREFIX)?;
        STANDARD.decode(encoded).ok()
    }
}

impl std::fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapturedImage")
            .field("size", &self.size)
            .field("captured_at", &self.captured_at)
            .field("degraded", &self.degraded)
            .field("payload_bytes", &self.data_uri.len())
            .finish()
    }
}

/// Wraps encoded JPEG bytes in a data URI.
pub fn jpeg_data_uri(jpeg: &[u8]) -> String {
    let mut uri = String::with_capacity(JPEG_DATA_URI_PREFIX.len() + jpeg.len() * 4 / 3 + 4);
    uri.push_str(JPEG_DATA_URI_PREFIX);
    STANDARD.encode_string(jpeg, &mut uri);
    uri
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_decodes() {
        let bytes = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        let image = CapturedImage::new(jpeg_data_uri(&bytes), Size::new(1, 1), false);
        assert!(image.data_uri().starts_with(JPEG_DATA_URI_PREFIX));
        assert_eq!(image.jpeg_bytes().unwrap(), bytes);
    }

    #[test]
    fn test_foreign_payload_does_not_decode() {
        let image = CapturedImage::new("data:image/png;base64,AAAA".into(), Size::new(1, 1), false);
        assert!(image.jpeg_bytes().is_none());
    }
}
