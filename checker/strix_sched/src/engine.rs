//! The consumed inference-engine interface.
//!
//! The engine — lexer, binder, type inference — is an external collaborator.
//! This core only requires that it produce raw diagnostics per file, honor
//! the cancellation handle at reasonable checkpoints, and be safely
//! abandonable (no partial side effects if a result is discarded).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use strix_diagnostic::RawDiagnostic;
use strix_rules::{RuleSet, TypeEvalFlags};

use crate::cancel::CancelHandle;

/// Monotonically increasing version stamp identifying one analysis attempt
/// for a target.
pub type Generation = u64;

/// A unit of analyzable work.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Target {
    /// One project-relative source file.
    File(PathBuf),
    /// A whole-project pass over the engine's include set.
    Project,
}

impl Target {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Target::File(path.into())
    }
}

/// Immutable configuration snapshot handed to workers.
///
/// Each work order carries its own `Arc` of the snapshot current at enqueue
/// time; a configuration reload builds a fresh snapshot and supersedes
/// in-flight work rather than mutating anything shared.
#[derive(Clone, Debug)]
pub struct ConfigSnapshot {
    pub rules: Arc<RuleSet>,
}

impl ConfigSnapshot {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        ConfigSnapshot { rules }
    }

    /// Type-evaluation flags for `path`, from its execution-environment
    /// scope (empty outside any scope).
    pub fn flags_for(&self, path: &Path) -> TypeEvalFlags {
        self.rules
            .environment_for(path)
            .map_or(TypeEvalFlags::empty(), |env| env.flags)
    }
}

/// Failure mode of one engine run.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Expected outcome of supersession — silent and structural, never
    /// logged as a failure.
    #[error("analysis cancelled")]
    Cancelled,

    /// Genuine engine failure, isolated to its target.
    #[error("analysis failed: {0}")]
    Failed(String),
}

/// The external inference engine.
pub trait AnalysisEngine: Send + Sync + 'static {
    /// Analyze one project-relative file under a configuration snapshot.
    ///
    /// Must poll `cancel` at reasonable checkpoints (typically between major
    /// analysis phases) and return [`EngineError::Cancelled`] when signaled.
    fn analyze(
        &self,
        file: &Path,
        config: &ConfigSnapshot,
        cancel: &dyn CancelHandle,
    ) -> Result<Vec<RawDiagnostic>, EngineError>;

    /// The project's include set, project-root-relative. Discovery and
    /// include/exclude matching happen upstream of this core.
    fn project_files(&self, config: &ConfigSnapshot) -> Vec<PathBuf>;
}
