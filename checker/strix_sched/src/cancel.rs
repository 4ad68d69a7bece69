//! Cooperative cancellation capability.
//!
//! Background work may run in another thread or another OS process, so the
//! signal is abstracted behind a two-method capability. Signaling is
//! idempotent: cancelling an already-finished or already-cancelled task is
//! a no-op by construction.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cross-boundary cancellation signal.
///
/// Workers poll [`is_signaled`](CancelHandle::is_signaled) at their
/// checkpoints; the scheduler calls [`signal`](CancelHandle::signal) on
/// supersession. No true preemption is assumed.
pub trait CancelHandle: Send + Sync {
    fn signal(&self);
    fn is_signaled(&self) -> bool;
}

/// In-process cancellation flag.
#[derive(Debug, Default)]
pub struct FlagCancel {
    signaled: AtomicBool,
}

impl FlagCancel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CancelHandle for FlagCancel {
    fn signal(&self) {
        self.signaled.store(true, Ordering::Release);
    }

    fn is_signaled(&self) -> bool {
        self.signaled.load(Ordering::Acquire)
    }
}

/// Filesystem-marker cancellation, observable across OS processes.
///
/// Signal creates the marker file; observers poll for its existence. The
/// marker's parent directory must exist or signaling is silently dropped —
/// the worker then simply runs to completion and the scheduler's delivery
/// discard still applies.
#[derive(Debug, Clone)]
pub struct MarkerCancel {
    marker: PathBuf,
}

impl MarkerCancel {
    pub fn new(marker: impl Into<PathBuf>) -> Self {
        MarkerCancel {
            marker: marker.into(),
        }
    }
}

impl CancelHandle for MarkerCancel {
    fn signal(&self) {
        if let Err(err) = std::fs::write(&self.marker, b"") {
            tracing::warn!(marker = %self.marker.display(), %err, "could not write cancellation marker");
        }
    }

    fn is_signaled(&self) -> bool {
        self.marker.exists()
    }
}
