use crate::{executor::ChunkExecutor, step::Step};
use chrono::Utc;
use engine_core::{
    error::{ConfigurationError, StepError},
    listener::JobListener,
    observer::{ExecutionObserver, TracingObserver},
    run_id::RunIdSequence,
};
use model::{
    events::BatchEvent,
    execution::{job::JobExecution, step::StepExecution},
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// An ordered sequence of steps executed as one run, with its lifecycle
/// listeners. Assembled once, runnable repeatedly; each run gets a fresh
/// execution id.
pub struct Job {
    pub name: String,
    pub(crate) steps: Vec<Step>,
    pub(crate) listeners: Vec<Arc<dyn JobListener>>,
}

pub struct JobBuilder {
    name: String,
    steps: Vec<Step>,
    listeners: Vec<Arc<dyn JobListener>>,
}

impl JobBuilder {
    pub fn new(name: &str) -> Self {
        JobBuilder {
            name: name.to_string(),
            steps: Vec::new(),
            listeners: Vec::new(),
        }
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn listener(mut self, listener: Arc<dyn JobListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn build(self) -> Result<Job, ConfigurationError> {
        if self.steps.is_empty() {
            return Err(ConfigurationError::NoSteps(self.name));
        }
        Ok(Job {
            name: self.name,
            steps: self.steps,
            listeners: self.listeners,
        })
    }
}

/// Sequences the steps of a job and manages the `JobExecution` lifecycle.
/// A step failure marks the run FAILED and halts further sequencing; the
/// failed execution is returned to the caller, never thrown as a crash.
pub struct JobLauncher {
    run_ids: Arc<RunIdSequence>,
    observer: Arc<dyn ExecutionObserver>,
    cancel: CancellationToken,
}

impl JobLauncher {
    pub fn new(run_ids: Arc<RunIdSequence>) -> Self {
        JobLauncher {
            run_ids,
            observer: Arc::new(TracingObserver),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Runs the job once and returns the finalized execution.
    pub async fn run(&self, job: &mut Job) -> JobExecution {
        // Run ids are assigned synchronously before execution starts, so a
        // collision is a configuration error, not a runtime race.
        let run_id = self.run_ids.next();
        let mut execution = JobExecution::new(&job.name, run_id);

        info!(job = %job.name, run_id, "Launching job");
        self.observer.on_event(&BatchEvent::JobStarted {
            job: job.name.clone(),
            run_id,
            timestamp: Utc::now(),
        });

        for listener in &job.listeners {
            listener.before_job(&execution).await;
        }

        execution.mark_started();
        let executor = ChunkExecutor::new(self.observer.clone(), self.cancel.clone());

        for step in &mut job.steps {
            if self.cancel.is_cancelled() {
                warn!(job = %job.name, run_id, step = %step.name, "Cancelled before step start");
                execution.mark_stopped();
                break;
            }

            let mut step_execution = StepExecution::new(&step.name);
            let result = executor
                .execute(&job.name, run_id, step, &mut step_execution)
                .await;
            execution.add_step_execution(step_execution);

            match result {
                Ok(()) => {}
                Err(StepError::Cancelled) => {
                    execution.mark_stopped();
                    break;
                }
                Err(e) => {
                    execution.mark_failed(&e.to_string());
                    break;
                }
            }
        }

        if !execution.status.is_terminal() {
            execution.mark_completed();
        }

        self.observer.on_event(&BatchEvent::JobFinished {
            job: job.name.clone(),
            run_id,
            status: execution.status,
            items_written: execution.items_written(),
            duration_ms: execution.duration_ms(),
            timestamp: Utc::now(),
        });

        for listener in &job.listeners {
            listener.after_job(&execution).await;
        }

        execution
    }
}
