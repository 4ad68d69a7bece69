//! Background analysis scheduling with cooperative cancellation.
//!
//! One foreground coordinator actor plus a pool of background workers. The
//! coordinator is single-threaded with respect to its own state (task table,
//! generation counter); workers are CPU-bound, share no mutable analysis
//! state, and each carries an immutable configuration snapshot per work
//! order. Cancellation is advisory for workers but binding on delivery:
//! a stale generation's payload is discarded, never published.

mod batch;
mod cancel;
mod coordinator;
mod engine;
mod scheduler;
mod session;
mod state;

pub use batch::run_batch;
pub use cancel::{CancelHandle, FlagCancel, MarkerCancel};
pub use coordinator::{Delivered, FileDiagnostics, QueryResult, TaskState};
pub use engine::{AnalysisEngine, ConfigSnapshot, EngineError, Generation, Target};
pub use scheduler::Scheduler;
pub use session::{Session, SessionError};
pub use state::SharedState;
