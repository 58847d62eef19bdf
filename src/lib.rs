//! Viewfinder Camera Component
//!
//! Live camera preview and still capture for browser-hosted applications.
//! Negotiates camera access across old and new platform entry points,
//! plays the stream into a video element, and captures JPEG stills that
//! match exactly what the preview shows.
//!
//! # Architecture
//!
//! The system follows an explicit data flow:
//!
//! ```text
//! options → constraints → acquire → (live preview) → capture
//!                            ↓                          ↓
//!                         session                  data URI
//! ```
//!
//! Platform access sits behind two traits, [`acquire::MediaHost`] and
//! [`acquire::VideoSink`], and capture draws through
//! [`capture::FrameSource`] and [`capture::DrawBuffer`]. The `web` feature
//! provides browser implementations on `wasm32`; the crate itself ships
//! in-memory ones for tests and the CLI.
//!
//! # Example
//!
//! ```no_run
//! use futures::executor::block_on;
//! use viewfinder::{
//!     acquire::{EntryPoint, MockHost, MockSink},
//!     capture::{CropPolicy, RasterBuffer, Size, StillFrame},
//!     CameraOptions, Viewfinder,
//! };
//!
//! let options = CameraOptions {
//!     crop_to_fit: CropPolicy::Portrait3x4,
//!     ..Default::default()
//! };
//! let mut camera = Viewfinder::new(MockHost::new(EntryPoint::Modern), options).unwrap();
//!
//! let mut sink = MockSink::new();
//! block_on(camera.start(&mut sink)).unwrap();
//!
//! let video = StillFrame::synthetic(Size::new(1280, 720), Size::new(711, 400));
//! let viewport = Size::new(300, 400);
//! let mut canvas = RasterBuffer::new();
//! let image = camera
//!     .screenshot(Some(&video), Some(&viewport), Some(&mut canvas))
//!     .unwrap();
//! println!("{}", image.data_uri());
//!
//! camera.stop();
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod acquire;
pub mod capture;
pub mod config;
pub mod constraints;
pub mod error;
pub mod viewfinder;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

// Re-export commonly used types at crate root
pub use acquire::{acquire, AcquireError, MediaHost, PermissionState, Session, VideoSink};
pub use capture::{capture, CaptureError, CapturedImage, CropPolicy, PreviewLayout};
pub use config::{CameraOptions, FileConfig};
pub use constraints::{resolve, FacingMode, MediaConstraints, ResolutionSpec};
pub use error::Error;
pub use viewfinder::Viewfinder;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
