//! Constraint negotiation.
//!
//! Turns declarative camera options into the constraints dictionary sent
//! to the platform. Everything here is pure: the browser's capabilities
//! and the device class are passed in, never looked up.

mod device;
mod resolution;
mod resolver;

pub use device::{DeviceClass, FacingMode, FacingModeSupport};
pub use resolution::{ResolutionError, ResolutionSpec, DEFAULT_IDEAL, DEFAULT_MIN};
pub use resolver::{resolve, ConstrainRange, IdealOnly, MediaConstraints, VideoConstraints};
