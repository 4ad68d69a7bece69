//! Data-parallel analysis of a file batch.

use std::path::PathBuf;

use rayon::prelude::*;
use strix_diagnostic::RawDiagnostic;

use crate::cancel::CancelHandle;
use crate::engine::{AnalysisEngine, ConfigSnapshot, EngineError};

/// Analyze a batch of files across the rayon pool.
///
/// Files share no mutable analysis state, so the batch splits freely. Each
/// file checks the cancellation handle before starting; a signal observed at
/// that checkpoint (or inside the engine) abandons the whole batch with
/// [`EngineError::Cancelled`]. Output order matches input order.
pub fn run_batch(
    engine: &dyn AnalysisEngine,
    files: &[PathBuf],
    config: &ConfigSnapshot,
    cancel: &dyn CancelHandle,
) -> Result<Vec<(PathBuf, Vec<RawDiagnostic>)>, EngineError> {
    files
        .par_iter()
        .map(|file| {
            if cancel.is_signaled() {
                return Err(EngineError::Cancelled);
            }
            let raw = engine.analyze(file, config, cancel)?;
            Ok((file.clone(), raw))
        })
        .collect()
}
