//! Baseline persistence and reconciliation.
//!
//! A baseline is a persisted set of previously-seen, accepted diagnostics,
//! used to avoid re-flagging pre-existing issues while still surfacing new
//! ones. Matching is positional but line-number-free: entries survive edits
//! that shift unrelated lines. The store owns the on-disk file exclusively;
//! concurrent writers are unsupported (last write wins).

mod diff;
mod model;
mod reconcile;
mod store;

pub use diff::sequence_matches;
pub use model::{normalize_slashes, BaselineEntry, BaselineFile, BaselineRange};
pub use reconcile::{demotion_for, rebuild, reconcile, FileCheck, FsFileCheck, Reconciled, ScanMode};
pub use store::{BaselineError, BaselineStore, BASELINE_PATH};
