//! Normalization of camera-access entry points.
//!
//! Whatever vintage of the API the host exposes, callers get a single
//! asynchronous [`UserMedia::request_stream`]. Nothing on the host is
//! patched; the adapter is a value handed back to the caller.
//!
//! # Legacy shim lifecycle
//!
//! A host exposes at most one legacy vendor function and it does not change
//! while the process runs. The first legacy normalization binds that vendor
//! for the rest of the process through [`install_legacy_shim`]; later calls
//! are no-ops that return the bound vendor. There is no uninstall.

use super::platform::{EntryPoint, LegacyVendor, MediaHost, PlatformError};
use super::AcquireError;
use crate::constraints::MediaConstraints;
use futures::channel::oneshot;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::OnceLock;

static LEGACY_SHIM: OnceLock<LegacyVendor> = OnceLock::new();

/// Binds the legacy adapter for this process. Idempotent.
///
/// Returns the vendor bound by the first call.
pub fn install_legacy_shim(vendor: LegacyVendor) -> LegacyVendor {
    *LEGACY_SHIM.get_or_init(|| {
        tracing::info!(
            entry_point = vendor.function_name(),
            "Installed promise adapter for legacy getUserMedia"
        );
        vendor
    })
}

/// The legacy vendor bound for this process, if any.
pub fn legacy_shim() -> Option<LegacyVendor> {
    LEGACY_SHIM.get().copied()
}

/// A host's camera access, normalized to one promise-like shape.
#[derive(Debug)]
pub enum UserMedia<'h, H> {
    Modern(&'h H),
    Legacy { host: &'h H, vendor: LegacyVendor },
}

impl<'h, H: MediaHost> UserMedia<'h, H> {
    /// Probes the host and builds the matching adapter.
    ///
    /// Fails with [`AcquireError::UnsupportedEnvironment`] when the host has
    /// no entry point at all.
    pub fn probe(host: &'h H) -> Result<Self, AcquireError> {
        match host.probe() {
            EntryPoint::None => Err(AcquireError::UnsupportedEnvironment),
            EntryPoint::Modern => Ok(UserMedia::Modern(host)),
            EntryPoint::Legacy(probed) => {
                let vendor = install_legacy_shim(probed);
                if vendor != probed {
                    tracing::warn!(
                        bound = vendor.function_name(),
                        probed = probed.function_name(),
                        "Legacy entry point changed after shim installation; keeping the bound one"
                    );
                }
                Ok(UserMedia::Legacy { host, vendor })
            }
        }
    }

    /// Whether this adapter wraps a legacy callback API.
    pub fn is_legacy(&self) -> bool {
        matches!(self, UserMedia::Legacy { .. })
    }

    /// Requests a stream matching `constraints`.
    pub async fn request_stream(
        &self,
        constraints: &MediaConstraints,
    ) -> Result<H::Stream, PlatformError> {
        match self {
            UserMedia::Modern(host) => host.request_stream(constraints).await,
            UserMedia::Legacy { host, vendor } => {
                // Both callbacks share one sender; whichever fires first wins.
                let (tx, rx) = oneshot::channel();
                let ok_tx = Rc::new(Cell::new(Some(tx)));
                let err_tx = Rc::clone(&ok_tx);

                host.request_stream_legacy(
                    *vendor,
                    constraints,
                    Box::new(move |stream| {
                        if let Some(tx) = ok_tx.take() {
                            let _ = tx.send(Ok(stream));
                        }
                    }),
                    Box::new(move |error| {
                        if let Some(tx) = err_tx.take() {
                            let _ = tx.send(Err(error));
                        }
                    }),
                );

                rx.await.unwrap_or_else(|_| {
                    Err(PlatformError::new(
                        "AbortError",
                        "legacy getUserMedia dropped its callbacks",
                    ))
                })
            }
        }
    }
}
