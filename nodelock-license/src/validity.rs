//! License validity predicates.

use crate::clock::{Clock, SystemClock};
use crate::codec::LicenseCodec;
use crate::device::{Fingerprint, SystemFingerprint};
use crate::store;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

/// A yes/no judgment on whether the running process remains licensed.
///
/// Implemented for closures so tests and embedders can script outcomes.
pub trait ValidityCheck: Send + 'static {
    /// Returns false when the process must stop.
    fn check(&self) -> bool;
}

impl<F> ValidityCheck for F
where
    F: Fn() -> bool + Send + 'static,
{
    fn check(&self) -> bool {
        self()
    }
}

/// The default predicate: re-decode the license file, compare the machine
/// fingerprint, check the grant window.
///
/// Every failure path is fail-closed: a missing or malformed file, a
/// fingerprint mismatch, and an unparseable window all read as invalid.
pub struct DefaultValidity {
    path: PathBuf,
    codec: LicenseCodec,
    fingerprint: Arc<dyn Fingerprint>,
    clock: Arc<dyn Clock>,
}

impl DefaultValidity {
    /// Creates the default predicate over the license file at `path`.
    pub fn new(path: impl Into<PathBuf>, codec: LicenseCodec) -> Self {
        Self {
            path: path.into(),
            codec,
            fingerprint: Arc::new(SystemFingerprint),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the fingerprint provider.
    #[must_use]
    pub fn with_fingerprint(mut self, fingerprint: Arc<dyn Fingerprint>) -> Self {
        self.fingerprint = fingerprint;
        self
    }

    /// Replaces the wall-clock source.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

impl ValidityCheck for DefaultValidity {
    fn check(&self) -> bool {
        let bytes = match store::read_artifact(&self.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "license file unreadable");
                return false;
            }
        };
        let record = match self.codec.decode(&bytes) {
            Ok(record) => record,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "license rejected");
                return false;
            }
        };
        if self.fingerprint.motherboard_id() != record.mother_board_id {
            warn!("license is bound to a different machine");
            return false;
        }
        match record.window_contains(self.clock.now()) {
            Ok(true) => true,
            Ok(false) => {
                warn!(
                    start = %record.start_time,
                    end = %record.end_time,
                    "outside the grant window"
                );
                false
            }
            Err(err) => {
                warn!(%err, "unparseable grant window");
                false
            }
        }
    }
}
