use crate::execution::job::JobStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle events emitted by the engine to an injected observer, keeping
/// observability decoupled from the read-process-write control flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BatchEvent {
    /// Emitted when a job run is launched, before any step executes.
    JobStarted {
        job: String,
        run_id: u64,
        timestamp: DateTime<Utc>,
    },

    /// Emitted when a step begins executing.
    StepStarted {
        job: String,
        run_id: u64,
        step: String,
        timestamp: DateTime<Utc>,
    },

    /// Emitted after a chunk's transaction commits.
    ChunkFlushed {
        job: String,
        run_id: u64,
        step: String,
        rows: u64,
        total_written: u64,
        timestamp: DateTime<Utc>,
    },

    /// Emitted when a step terminates with a fatal error.
    StepFailed {
        job: String,
        run_id: u64,
        step: String,
        error: String,
        timestamp: DateTime<Utc>,
    },

    /// Emitted when a step stops at a chunk boundary after cancellation.
    StepStopped {
        job: String,
        run_id: u64,
        step: String,
        timestamp: DateTime<Utc>,
    },

    /// Emitted once per run with the final status, after all sequencing.
    JobFinished {
        job: String,
        run_id: u64,
        status: JobStatus,
        items_written: u64,
        duration_ms: Option<i64>,
        timestamp: DateTime<Utc>,
    },
}

impl BatchEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            BatchEvent::JobStarted { .. } => "job.started",
            BatchEvent::StepStarted { .. } => "step.started",
            BatchEvent::ChunkFlushed { .. } => "chunk.flushed",
            BatchEvent::StepFailed { .. } => "step.failed",
            BatchEvent::StepStopped { .. } => "step.stopped",
            BatchEvent::JobFinished { .. } => "job.finished",
        }
    }
}
