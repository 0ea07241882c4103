use model::events::BatchEvent;
use tracing::{error, info, warn};

/// Receives lifecycle events from the executor and controller. Keeps
/// observability out of the core control flow; implementations must not
/// block or fail.
pub trait ExecutionObserver: Send + Sync {
    fn on_event(&self, event: &BatchEvent);
}

/// Default observer: emits each event as a structured tracing record.
pub struct TracingObserver;

impl ExecutionObserver for TracingObserver {
    fn on_event(&self, event: &BatchEvent) {
        match event {
            BatchEvent::JobStarted { job, run_id, .. } => {
                info!(job = %job, run_id, "Job started");
            }
            BatchEvent::StepStarted {
                job, run_id, step, ..
            } => {
                info!(job = %job, run_id, step = %step, "Step started");
            }
            BatchEvent::ChunkFlushed {
                job,
                run_id,
                step,
                rows,
                total_written,
                ..
            } => {
                info!(
                    job = %job,
                    run_id,
                    step = %step,
                    rows,
                    total_written,
                    "Chunk flushed"
                );
            }
            BatchEvent::StepFailed {
                job,
                run_id,
                step,
                error: cause,
                ..
            } => {
                error!(job = %job, run_id, step = %step, error = %cause, "Step failed");
            }
            BatchEvent::StepStopped {
                job, run_id, step, ..
            } => {
                warn!(job = %job, run_id, step = %step, "Step stopped");
            }
            BatchEvent::JobFinished {
                job,
                run_id,
                status,
                items_written,
                duration_ms,
                ..
            } => {
                info!(
                    job = %job,
                    run_id,
                    status = %status,
                    items_written,
                    duration_ms = duration_ms.unwrap_or(0),
                    "Job finished"
                );
            }
        }
    }
}

/// Discards every event. Useful in tests that assert on state, not logs.
pub struct NullObserver;

impl ExecutionObserver for NullObserver {
    fn on_event(&self, _event: &BatchEvent) {}
}
