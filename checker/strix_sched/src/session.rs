//! The session: a project root, its configuration, and its scheduler.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use strix_baseline::{
    normalize_slashes, rebuild, BaselineEntry, BaselineError, BaselineFile, BaselineStore,
    FsFileCheck, ScanMode,
};
use strix_diagnostic::{normalize, summary_message};
use strix_ir::Category;
use strix_rules::{CheckerConfig, ConfigError, Rule, RuleOverrides, RuleSet};

use crate::cancel::FlagCancel;
use crate::coordinator::QueryResult;
use crate::engine::{AnalysisEngine, ConfigSnapshot, EngineError, Target};
use crate::run_batch;
use crate::scheduler::Scheduler;
use crate::state::SharedState;

/// Failure of a synchronous session operation.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Baseline(#[from] BaselineError),
}

/// One checking session over a project root.
///
/// Owns the shared state and the scheduler. Configuration errors are loud:
/// a session does not open, and a reload does not take effect, until the
/// document validates.
pub struct Session {
    engine: Arc<dyn AnalysisEngine>,
    shared: Arc<SharedState>,
    scheduler: Scheduler,
}

impl Session {
    /// Open a session: validate the configuration, load the persisted
    /// baseline, and start the scheduler.
    pub fn open(
        root: impl Into<PathBuf>,
        engine: Arc<dyn AnalysisEngine>,
        config: &CheckerConfig,
        worker_count: usize,
    ) -> Result<Self, ConfigError> {
        let rules = Arc::new(RuleSet::from_config(config)?);
        let shared = Arc::new(SharedState::new(root, rules));
        let scheduler = Scheduler::new(Arc::clone(&engine), Arc::clone(&shared), worker_count);
        Ok(Session {
            engine,
            shared,
            scheduler,
        })
    }

    /// Request background analysis of a target, superseding any in-flight
    /// run for it.
    pub fn request_check(&self, target: Target) {
        self.scheduler.notify_change(target);
    }

    /// Latest published diagnostics for a target, without blocking.
    pub fn diagnostics(&self, target: &Target) -> QueryResult {
        self.scheduler.diagnostics(target)
    }

    /// Swap in a revalidated configuration, including the editor-settings
    /// override layer, and re-analyze every tracked target.
    ///
    /// On validation failure nothing changes: the previous rule set stays
    /// active.
    pub fn reload_config(
        &self,
        config: &CheckerConfig,
        editor: &RuleOverrides,
    ) -> Result<(), ConfigError> {
        let rules = Arc::new(RuleSet::with_editor_overrides(config, editor)?);
        self.shared.set_rules(rules);
        self.scheduler.notify_config_reloaded();
        Ok(())
    }

    /// Re-scan, rebuild, and persist the baseline; returns the
    /// consumer-facing delta message.
    ///
    /// Runs synchronously on the caller's thread. Under
    /// [`ScanMode::Exhaustive`] the scan covers the engine's whole include
    /// set; under [`ScanMode::OpenFilesOnly`] it covers exactly
    /// `open_files`, and unscanned files keep their existing entries.
    pub fn update_baseline(
        &self,
        mode: ScanMode,
        open_files: &[PathBuf],
    ) -> Result<String, SessionError> {
        let config = ConfigSnapshot::new(self.shared.rules());
        let files = match mode {
            ScanMode::Exhaustive => self.engine.project_files(&config),
            ScanMode::OpenFilesOnly => open_files.to_vec(),
        };
        let scanned = run_batch(self.engine.as_ref(), &files, &config, &FlagCancel::new())?;

        let mut observed: BTreeMap<String, Vec<BaselineEntry>> = BTreeMap::new();
        for (path, raw) in scanned {
            let severities = self.shared.severities_for(&path);
            let canonical = normalize(raw, &severities);
            let entries = canonical.iter().map(BaselineEntry::from_diagnostic).collect();
            observed.insert(normalize_slashes(&path), entries);
        }

        let previous = self.shared.baseline();
        let fs = FsFileCheck::new(self.shared.root());
        let rebuilt = rebuild(&previous, &observed, mode, &fs);
        BaselineStore::save(self.shared.root(), &rebuilt)?;

        let message = summary_message(
            self.baseline_errors(&previous),
            self.baseline_errors(&rebuilt),
        );
        self.shared.set_baseline(rebuilt);
        Ok(message)
    }

    /// Error-category entry count of a baseline under the active
    /// configuration.
    ///
    /// Entries persist no category, so each one's rule is resolved through
    /// the current severity map; entries without a code persist rule-less
    /// engine errors and always count.
    fn baseline_errors(&self, baseline: &BaselineFile) -> usize {
        baseline
            .files
            .iter()
            .map(|(path, entries)| {
                let severities = self.shared.severities_for(Path::new(path));
                entries
                    .iter()
                    .filter(|entry| match entry.code.as_deref().and_then(Rule::parse) {
                        Some(rule) => severities
                            .get(rule)
                            .category()
                            .is_some_and(Category::is_error),
                        None => true,
                    })
                    .count()
            })
            .sum()
    }

    /// Stop background analysis, waiting for threads to exit.
    pub fn shutdown(&mut self) {
        self.scheduler.shutdown();
    }
}

#[cfg(test)]
mod tests;
