//! Shared project state read by the coordinator and the session.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use strix_baseline::{normalize_slashes, BaselineEntry, BaselineFile, BaselineStore};
use strix_rules::{ResolverCache, RuleSet, SeverityMap};

/// Rule configuration and baseline for one project root.
///
/// The coordinator reads this when publishing results; the session replaces
/// the rule set on configuration reload and the baseline on explicit update.
/// Both swaps are wholesale — snapshots in flight keep their own `Arc`s. The
/// active rule set lives inside the resolver cache, so rules and memoized
/// maps always swap together.
pub struct SharedState {
    root: PathBuf,
    cache: ResolverCache,
    baseline: RwLock<BaselineFile>,
}

impl SharedState {
    /// Load the baseline for `root` and wrap the initial rule set.
    pub fn new(root: impl Into<PathBuf>, rules: Arc<RuleSet>) -> Self {
        let root = root.into();
        let baseline = BaselineStore::load(&root);
        SharedState {
            root,
            cache: ResolverCache::new(rules),
            baseline: RwLock::new(baseline),
        }
    }

    /// Project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Current rule set.
    pub fn rules(&self) -> Arc<RuleSet> {
        self.cache.rules()
    }

    /// Replace the rule set, dropping every memoized severity map in the
    /// same critical section.
    pub fn set_rules(&self, rules: Arc<RuleSet>) {
        self.cache.install(rules);
    }

    /// Resolver-cache generation, bumped on every reload.
    pub fn config_generation(&self) -> u64 {
        self.cache.generation()
    }

    /// Severity map for `path`, memoized per configuration generation.
    pub fn severities_for(&self, path: &Path) -> Arc<SeverityMap> {
        self.cache.resolve(path)
    }

    /// Baseline entries accepted for `path`.
    pub fn baseline_entries(&self, path: &Path) -> Vec<BaselineEntry> {
        self.baseline
            .read()
            .entries_for(&normalize_slashes(path))
            .to_vec()
    }

    /// Snapshot of the whole in-memory baseline.
    pub fn baseline(&self) -> BaselineFile {
        self.baseline.read().clone()
    }

    /// Replace the in-memory baseline after a persisted rebuild.
    pub fn set_baseline(&self, baseline: BaselineFile) {
        *self.baseline.write() = baseline;
    }
}
