use crate::execution::step::StepExecution;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Run-level status of a job execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Starting,
    Started,
    Completed,
    Failed,
    Stopped,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed | JobStatus::Stopped
        )
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            JobStatus::Starting => "STARTING",
            JobStatus::Started => "STARTED",
            JobStatus::Completed => "COMPLETED",
            JobStatus::Failed => "FAILED",
            JobStatus::Stopped => "STOPPED",
        };
        f.write_str(label)
    }
}

/// The run-level state record for one invocation of a job. Created by the
/// job controller when a run is launched and mutated only by it; terminal
/// once the status reaches COMPLETED, FAILED or STOPPED.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobExecution {
    pub id: u64,
    pub job_name: String,
    pub status: JobStatus,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub exit_message: Option<String>,
    pub step_executions: Vec<StepExecution>,
}

impl JobExecution {
    pub fn new(job_name: &str, id: u64) -> Self {
        JobExecution {
            id,
            job_name: job_name.to_string(),
            status: JobStatus::Starting,
            start_time: None,
            end_time: None,
            exit_message: None,
            step_executions: Vec::new(),
        }
    }

    pub fn mark_started(&mut self) {
        if self.guard_terminal("mark_started") {
            return;
        }
        self.status = JobStatus::Started;
        self.start_time = Some(Utc::now());
    }

    pub fn mark_completed(&mut self) {
        if self.guard_terminal("mark_completed") {
            return;
        }
        self.status = JobStatus::Completed;
        self.end_time = Some(Utc::now());
    }

    pub fn mark_failed(&mut self, message: &str) {
        if self.guard_terminal("mark_failed") {
            return;
        }
        self.status = JobStatus::Failed;
        self.exit_message = Some(message.to_string());
        self.end_time = Some(Utc::now());
    }

    pub fn mark_stopped(&mut self) {
        if self.guard_terminal("mark_stopped") {
            return;
        }
        self.status = JobStatus::Stopped;
        self.end_time = Some(Utc::now());
    }

    pub fn add_step_execution(&mut self, step: StepExecution) {
        self.step_executions.push(step);
    }

    pub fn duration_ms(&self) -> Option<i64> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some((end - start).num_milliseconds()),
            _ => None,
        }
    }

    /// Total items written across all steps of this run.
    pub fn items_written(&self) -> u64 {
        self.step_executions.iter().map(|s| s.write_count).sum()
    }

    fn guard_terminal(&self, transition: &str) -> bool {
        if self.status.is_terminal() {
            warn!(
                job = %self.job_name,
                run_id = self.id,
                status = %self.status,
                transition,
                "Ignoring transition out of a terminal job status"
            );
            return true;
        }
        false
    }
}
