//! Thread plumbing around the coordinator state machine.

use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam::channel::{unbounded, Receiver, Sender};
use dashmap::DashMap;

use crate::batch::run_batch;
use crate::coordinator::{CoordinatorState, Delivered, Event, QueryResult, WorkOrder};
use crate::engine::{AnalysisEngine, Target};
use crate::state::SharedState;

/// Background analysis scheduler.
///
/// One coordinator thread owns the task table; `worker_count` worker threads
/// pull work orders off a shared channel and report back as events. Queries
/// read the published-results map directly and never block on analysis.
pub struct Scheduler {
    events: Sender<Event>,
    results: Arc<DashMap<Target, Delivered>>,
    coordinator: Option<JoinHandle<()>>,
    workers: Vec<JoinHandle<()>>,
}

impl Scheduler {
    pub fn new(
        engine: Arc<dyn AnalysisEngine>,
        shared: Arc<SharedState>,
        worker_count: usize,
    ) -> Self {
        let (events_tx, events_rx) = unbounded::<Event>();
        let (work_tx, work_rx) = unbounded::<WorkOrder>();
        let results = Arc::new(DashMap::new());

        let state = CoordinatorState::new(shared, Arc::clone(&results));
        let coordinator = std::thread::Builder::new()
            .name("strix-coordinator".to_string())
            .spawn(move || coordinator_loop(state, events_rx, work_tx));
        let coordinator = match coordinator {
            Ok(handle) => Some(handle),
            Err(err) => {
                tracing::error!(%err, "could not spawn coordinator thread");
                None
            }
        };

        let workers = (0..worker_count.max(1))
            .filter_map(|index| {
                let engine = Arc::clone(&engine);
                let work_rx = work_rx.clone();
                let events_tx = events_tx.clone();
                std::thread::Builder::new()
                    .name(format!("strix-worker-{index}"))
                    .spawn(move || worker_loop(engine, work_rx, events_tx))
                    .map_err(|err| {
                        tracing::error!(%err, index, "could not spawn worker thread");
                    })
                    .ok()
            })
            .collect();

        Scheduler {
            events: events_tx,
            results,
            coordinator,
            workers,
        }
    }

    /// A target's content changed; supersede and re-analyze it.
    pub fn notify_change(&self, target: Target) {
        self.send(Event::Changed(target));
    }

    /// The configuration was reloaded; every tracked target is re-analyzed
    /// under the new snapshot.
    pub fn notify_config_reloaded(&self) {
        self.send(Event::ConfigReloaded);
    }

    /// Latest published result for a target, without blocking.
    pub fn diagnostics(&self, target: &Target) -> QueryResult {
        self.results
            .get(target)
            .map_or(QueryResult::Computing, |entry| {
                QueryResult::Ready(entry.value().clone())
            })
    }

    /// Stop the coordinator and workers, waiting for them to exit. In-flight
    /// work finishes or cancels; nothing further is published.
    pub fn shutdown(&mut self) {
        self.send(Event::Shutdown);
        if let Some(handle) = self.coordinator.take() {
            if handle.join().is_err() {
                tracing::error!("coordinator thread panicked");
            }
        }
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                tracing::error!("worker thread panicked");
            }
        }
    }

    fn send(&self, event: Event) {
        // Send failure means the coordinator already exited; the event has
        // no one left to act on it.
        let _ = self.events.send(event);
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn coordinator_loop(
    mut state: CoordinatorState,
    events: Receiver<Event>,
    work: Sender<WorkOrder>,
) {
    while let Ok(event) = events.recv() {
        match event {
            Event::Changed(target) => {
                let order = state.on_changed(target);
                let _ = work.send(order);
            }
            Event::ConfigReloaded => {
                for order in state.on_config_reloaded() {
                    let _ = work.send(order);
                }
            }
            Event::WorkerStarted { target, generation } => {
                state.on_worker_started(&target, generation);
            }
            Event::WorkerDone {
                target,
                generation,
                outcome,
            } => {
                state.on_worker_done(target, generation, outcome);
            }
            Event::Shutdown => {
                state.on_shutdown();
                break;
            }
        }
    }
    // Dropping the work sender closes the channel; workers drain and exit.
}

fn worker_loop(
    engine: Arc<dyn AnalysisEngine>,
    work: Receiver<WorkOrder>,
    events: Sender<Event>,
) {
    while let Ok(order) = work.recv() {
        let _ = events.send(Event::WorkerStarted {
            target: order.target.clone(),
            generation: order.generation,
        });
        let files = match &order.target {
            Target::File(path) => vec![path.clone()],
            Target::Project => engine.project_files(&order.config),
        };
        let outcome = run_batch(engine.as_ref(), &files, &order.config, order.cancel.as_ref());
        let _ = events.send(Event::WorkerDone {
            target: order.target,
            generation: order.generation,
            outcome,
        });
    }
}
