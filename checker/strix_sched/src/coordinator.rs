//! Coordinator state machine: task table, generations, result delivery.
//!
//! The coordinator is the single writer of the task table. Workers never
//! touch it; they report back through events, and the coordinator decides
//! whether a payload is still current. Anything carrying a generation older
//! than the target's tracked one is discarded unpublished — that discard,
//! not worker preemption, is what makes cancellation safe.

use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;
use rustc_hash::FxHashMap;
use strix_baseline::reconcile;
use strix_diagnostic::{normalize, CanonicalDiagnostic, RawDiagnostic};

use crate::cancel::{CancelHandle, FlagCancel};
use crate::engine::{ConfigSnapshot, EngineError, Generation, Target};
use crate::state::SharedState;

/// Lifecycle of one tracked analysis task.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TaskState {
    Queued,
    Running,
    Completed,
    Cancelled,
}

/// One file's share of a delivered payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileDiagnostics {
    pub path: PathBuf,
    /// Post-normalization, post-reconciliation diagnostics: what the
    /// consumer actually shows.
    pub visible: Vec<CanonicalDiagnostic>,
}

/// A published analysis result for one target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delivered {
    Diagnostics {
        generation: Generation,
        files: Vec<FileDiagnostics>,
    },
    /// The engine failed for this target; other targets are unaffected.
    EngineFailure {
        generation: Generation,
        message: String,
    },
}

impl Delivered {
    pub fn generation(&self) -> Generation {
        match self {
            Delivered::Diagnostics { generation, .. }
            | Delivered::EngineFailure { generation, .. } => *generation,
        }
    }
}

/// Non-blocking answer to a diagnostics query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryResult {
    /// The most recent published result. A newer run may be in flight;
    /// consumers re-query when notified rather than blocking here.
    Ready(Delivered),
    /// Nothing published yet for this target.
    Computing,
}

/// Instruction handed to the worker pool.
pub(crate) struct WorkOrder {
    pub target: Target,
    pub generation: Generation,
    pub config: ConfigSnapshot,
    pub cancel: Arc<dyn CancelHandle>,
}

/// Events the coordinator loop consumes.
pub(crate) enum Event {
    Changed(Target),
    ConfigReloaded,
    WorkerStarted {
        target: Target,
        generation: Generation,
    },
    WorkerDone {
        target: Target,
        generation: Generation,
        outcome: Result<Vec<(PathBuf, Vec<RawDiagnostic>)>, EngineError>,
    },
    Shutdown,
}

struct TaskEntry {
    generation: Generation,
    state: TaskState,
    cancel: Arc<dyn CancelHandle>,
}

/// Produces one cancellation handle per work order. Scheduling logic never
/// names a concrete handle type, so the strategy (in-process flag,
/// cross-process marker) can vary without touching it.
pub(crate) type CancelFactory = Box<dyn Fn() -> Arc<dyn CancelHandle> + Send>;

/// The coordinator's mutable state, separated from its thread loop so the
/// supersession and discard rules are testable synchronously.
pub(crate) struct CoordinatorState {
    shared: Arc<SharedState>,
    tasks: FxHashMap<Target, TaskEntry>,
    next_generation: Generation,
    results: Arc<DashMap<Target, Delivered>>,
    make_cancel: CancelFactory,
}

impl CoordinatorState {
    pub fn new(shared: Arc<SharedState>, results: Arc<DashMap<Target, Delivered>>) -> Self {
        Self::with_cancel_factory(
            shared,
            results,
            Box::new(|| Arc::new(FlagCancel::new()) as Arc<dyn CancelHandle>),
        )
    }

    pub fn with_cancel_factory(
        shared: Arc<SharedState>,
        results: Arc<DashMap<Target, Delivered>>,
        make_cancel: CancelFactory,
    ) -> Self {
        CoordinatorState {
            shared,
            tasks: FxHashMap::default(),
            next_generation: 0,
            results,
            make_cancel,
        }
    }

    /// A target changed: supersede any in-flight run and enqueue a fresh one
    /// under the next generation and the current configuration.
    pub fn on_changed(&mut self, target: Target) -> WorkOrder {
        self.next_generation += 1;
        let generation = self.next_generation;
        let cancel = (self.make_cancel)();
        if let Some(previous) = self.tasks.insert(
            target.clone(),
            TaskEntry {
                generation,
                state: TaskState::Queued,
                cancel: Arc::clone(&cancel),
            },
        ) {
            if matches!(previous.state, TaskState::Queued | TaskState::Running) {
                previous.cancel.signal();
                tracing::debug!(?target, superseded = previous.generation, by = generation, "superseding in-flight analysis");
            }
        }
        WorkOrder {
            target,
            generation,
            config: ConfigSnapshot::new(self.shared.rules()),
            cancel,
        }
    }

    /// Configuration reloaded: every tracked target is stale at once.
    /// In-flight runs are superseded and every target re-enqueued under the
    /// new snapshot.
    pub fn on_config_reloaded(&mut self) -> Vec<WorkOrder> {
        let targets: Vec<Target> = self.tasks.keys().cloned().collect();
        targets
            .into_iter()
            .map(|target| self.on_changed(target))
            .collect()
    }

    /// A worker picked up an order. Ignored when the order was already
    /// superseded while queued.
    pub fn on_worker_started(&mut self, target: &Target, generation: Generation) {
        if let Some(entry) = self.tasks.get_mut(target) {
            if entry.generation == generation && entry.state == TaskState::Queued {
                entry.state = TaskState::Running;
            }
        }
    }

    /// A worker finished. Stale generations are discarded unpublished; a
    /// current payload is normalized, reconciled against the baseline, and
    /// published.
    pub fn on_worker_done(
        &mut self,
        target: Target,
        generation: Generation,
        outcome: Result<Vec<(PathBuf, Vec<RawDiagnostic>)>, EngineError>,
    ) {
        let Some(entry) = self.tasks.get_mut(&target) else {
            return;
        };
        if entry.generation != generation {
            tracing::debug!(?target, stale = generation, current = entry.generation, "discarding stale analysis result");
            return;
        }
        match outcome {
            Ok(raw_files) => {
                entry.state = TaskState::Completed;
                let files = raw_files
                    .into_iter()
                    .map(|(path, raw)| self.reconcile_file(path, raw))
                    .collect();
                self.results
                    .insert(target, Delivered::Diagnostics { generation, files });
            }
            Err(EngineError::Cancelled) => {
                // Expected outcome of supersession; the replacing run's
                // result will arrive under a newer generation.
                entry.state = TaskState::Cancelled;
            }
            Err(EngineError::Failed(message)) => {
                entry.state = TaskState::Completed;
                tracing::warn!(?target, %message, "analysis failed");
                self.results
                    .insert(target, Delivered::EngineFailure { generation, message });
            }
        }
    }

    fn reconcile_file(&self, path: PathBuf, raw: Vec<RawDiagnostic>) -> FileDiagnostics {
        let severities = self.shared.severities_for(&path);
        let canonical = normalize(raw, &severities);
        let previous = self.shared.baseline_entries(&path);
        let visible = reconcile(&previous, &canonical).visible;
        FileDiagnostics { path, visible }
    }

    /// Shutting down: signal every queued or running task so workers wedged
    /// in the engine can bail out before the pool is joined.
    pub fn on_shutdown(&mut self) {
        for (target, entry) in &mut self.tasks {
            if matches!(entry.state, TaskState::Queued | TaskState::Running) {
                entry.cancel.signal();
                entry.state = TaskState::Cancelled;
                tracing::debug!(?target, generation = entry.generation, "cancelling task for shutdown");
            }
        }
    }

    /// Tracked lifecycle state of a target's latest run.
    pub fn task_state(&self, target: &Target) -> Option<TaskState> {
        self.tasks.get(target).map(|entry| entry.state)
    }
}
