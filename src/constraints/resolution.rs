//! Resolution strings in the compact `"<width>x<height>"` encoding.

use std::fmt;
use std::str::FromStr;

/// A requested video resolution.
///
/// Both dimensions are strictly positive. Values are built by parsing the
/// `"1920x1080"` encoding, which rejects anything that would otherwise
/// coerce to `0x0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolutionSpec {
    width: u32,
    height: u32,
}

/// Ideal resolution applied when the caller gives none.
pub const DEFAULT_IDEAL: ResolutionSpec = ResolutionSpec {
    width: 1920,
    height: 1080,
};

/// Minimum resolution applied when the caller gives none.
pub const DEFAULT_MIN: ResolutionSpec = ResolutionSpec {
    width: 640,
    height: 480,
};

impl ResolutionSpec {
    /// Creates a resolution from explicit dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, ResolutionError> {
        if width == 0 || height == 0 {
            return Err(ResolutionError::ZeroComponent(format!("{width}x{height}")));
        }
        Ok(Self { width, height })
    }

    /// Parses the `"<width>x<height>"` encoding.
    pub fn parse(input: &str) -> Result<Self, ResolutionError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ResolutionError::Empty);
        }

        let (width, height) = trimmed
            .split_once(['x', 'X'])
            .ok_or_else(|| ResolutionError::MissingSeparator(input.to_string()))?;

        let width = parse_component(input, width)?;
        let height = parse_component(input, height)?;
        Self::new(width, height).map_err(|_| ResolutionError::ZeroComponent(input.to_string()))
    }

    /// Returns the width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }
}

fn parse_component(input: &str, component: &str) -> Result<u32, ResolutionError> {
    // u32::from_str accepts a leading '+', which the encoding does not.
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ResolutionError::NonNumeric(input.to_string()));
    }
    component
        .parse()
        .map_err(|_| ResolutionError::NonNumeric(input.to_string()))
}

impl FromStr for ResolutionSpec {
    type Err = ResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ResolutionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Malformed resolution strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    #[error("malformed resolution string: empty")]
    Empty,
    #[error("malformed resolution string {0:?}: expected <width>x<height>")]
    MissingSeparator(String),
    #[error("malformed resolution string {0:?}: components must be integers")]
    NonNumeric(String),
    #[error("malformed resolution string {0:?}: components must be positive")]
    ZeroComponent(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_well_formed() {
        let spec = ResolutionSpec::parse("1280x720").unwrap();
        assert_eq!(spec.width(), 1280);
        assert_eq!(spec.height(), 720);
    }

    #[test]
    fn test_malformed_strings_fail() {
        assert_eq!(ResolutionSpec::parse(""), Err(ResolutionError::Empty));
        assert!(matches!(
            ResolutionSpec::parse("1280"),
            Err(ResolutionError::MissingSeparator(_))
        ));
        assert!(matches!(
            ResolutionSpec::parse("x720"),
            Err(ResolutionError::NonNumeric(_))
        ));
        assert!(matches!(
            ResolutionSpec::parse("widexhigh"),
            Err(ResolutionError::NonNumeric(_))
        ));
        assert!(matches!(
            ResolutionSpec::parse("+640x480"),
            Err(ResolutionError::NonNumeric(_))
        ));
        assert!(matches!(
            ResolutionSpec::parse("0x0"),
            Err(ResolutionError::ZeroComponent(_))
        ));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(DEFAULT_IDEAL.to_string(), "1920x1080");
        assert_eq!(DEFAULT_MIN.to_string(), "640x480");
    }

    proptest! {
        #[test]
        fn prop_parse_then_encode_round_trips(w in 1u32..=16384, h in 1u32..=16384) {
            let encoded = format!("{w}x{h}");
            let spec: ResolutionSpec = encoded.parse().unwrap();
            prop_assert_eq!((spec.width(), spec.height()), (w, h));
            prop_assert_eq!(spec.to_string(), encoded);
        }
    }
}
