use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of one step within a job execution.
/// `NotStarted -> Running -> {Completed, Failed, Stopped}`; a step instance
/// is single-use per job execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    NotStarted,
    Running,
    Completed,
    Failed,
    Stopped,
}

/// Per-step state nested under a `JobExecution`. Finalized at step end and
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepExecution {
    pub step_name: String,
    pub status: StepStatus,
    pub read_count: u64,
    pub write_count: u64,
    pub skip_count: u64,
    pub chunk_count: u64,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl StepExecution {
    pub fn new(step_name: &str) -> Self {
        StepExecution {
            step_name: step_name.to_string(),
            status: StepStatus::NotStarted,
            read_count: 0,
            write_count: 0,
            skip_count: 0,
            chunk_count: 0,
            start_time: None,
            end_time: None,
        }
    }

    pub fn mark_running(&mut self) {
        self.status = StepStatus::Running;
        self.start_time = Some(Utc::now());
    }

    pub fn mark_completed(&mut self) {
        self.status = StepStatus::Completed;
        self.end_time = Some(Utc::now());
    }

    pub fn mark_failed(&mut self) {
        self.status = StepStatus::Failed;
        self.end_time = Some(Utc::now());
    }

    pub fn mark_stopped(&mut self) {
        self.status = StepStatus::Stopped;
        self.end_time = Some(Utc::now());
    }

    pub fn inc_read(&mut self) {
        self.read_count += 1;
    }

    pub fn inc_skipped(&mut self) {
        self.skip_count += 1;
    }

    /// Records one committed chunk of `rows` items.
    pub fn record_chunk(&mut self, rows: u64) {
        self.write_count += rows;
        self.chunk_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_track_chunk_commits() {
        let mut exec = StepExecution::new("load");
        exec.mark_running();
        exec.inc_read();
        exec.inc_read();
        exec.inc_skipped();
        exec.record_chunk(1);
        exec.mark_completed();

        assert_eq!(exec.read_count, 2);
        assert_eq!(exec.skip_count, 1);
        assert_eq!(exec.write_count, 1);
        assert_eq!(exec.chunk_count, 1);
        assert_eq!(exec.status, StepStatus::Completed);
    }
}
