//! Diagnostic normalization.
//!
//! Converts the engine's raw per-file diagnostics into a canonical,
//! comparable form: severity resolved through the rule set, suppressed rules
//! dropped, order made deterministic, and a position-derived
//! [`Fingerprint`] attached for baseline matching.

mod diagnostic;
mod normalize;
mod summary;

pub use diagnostic::{CanonicalDiagnostic, Fingerprint, RawDiagnostic};
pub use normalize::normalize;
pub use summary::{count_errors, summary_message};
