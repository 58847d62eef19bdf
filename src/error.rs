//! Crate-level error type.

use crate::acquire::AcquireError;
use crate::capture::CaptureError;
use crate::config::ConfigError;
use crate::constraints::ResolutionError;
use thiserror::Error;

/// Any failure surfaced by the camera facade.
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Acquire(#[from] AcquireError),
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
