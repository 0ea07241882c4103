use crate::step::Step;
use chrono::Utc;
use engine_core::{error::StepError, observer::ExecutionObserver};
use model::{
    events::BatchEvent,
    execution::step::StepExecution,
    records::chunk::Chunk,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Drives the read-process-accumulate-write loop for one step, owning the
/// chunk buffer and the transaction boundary per chunk. Strictly
/// sequential: items are read and written in source order and a flush
/// blocks the loop until the sink commits or fails.
pub struct ChunkExecutor {
    observer: Arc<dyn ExecutionObserver>,
    cancel: CancellationToken,
}

impl ChunkExecutor {
    pub fn new(observer: Arc<dyn ExecutionObserver>, cancel: CancellationToken) -> Self {
        ChunkExecutor { observer, cancel }
    }

    /// Executes the step once. The source is opened at the start and closed
    /// on every exit path; the step execution is finalized with the
    /// matching terminal status before returning.
    pub async fn execute(
        &self,
        job_name: &str,
        run_id: u64,
        step: &mut Step,
        exec: &mut StepExecution,
    ) -> Result<(), StepError> {
        exec.mark_running();
        self.observer.on_event(&BatchEvent::StepStarted {
            job: job_name.to_string(),
            run_id,
            step: step.name.clone(),
            timestamp: Utc::now(),
        });

        let outcome = match step.source.open().await {
            Ok(()) => {
                let drive = self.drive(job_name, run_id, step, exec).await;
                match step.source.close().await {
                    Ok(()) => drive,
                    // A close failure after a clean run is itself fatal;
                    // after an error the original failure wins.
                    Err(close_err) => match drive {
                        Ok(()) => Err(close_err.into()),
                        Err(e) => {
                            warn!(
                                step = %step.name,
                                error = %close_err,
                                "Failed to close source after step error"
                            );
                            Err(e)
                        }
                    },
                }
            }
            Err(open_err) => Err(open_err.into()),
        };

        match &outcome {
            Ok(()) => exec.mark_completed(),
            Err(StepError::Cancelled) => {
                exec.mark_stopped();
                self.observer.on_event(&BatchEvent::StepStopped {
                    job: job_name.to_string(),
                    run_id,
                    step: step.name.clone(),
                    timestamp: Utc::now(),
                });
            }
            Err(e) => {
                exec.mark_failed();
                self.observer.on_event(&BatchEvent::StepFailed {
                    job: job_name.to_string(),
                    run_id,
                    step: step.name.clone(),
                    error: e.to_string(),
                    timestamp: Utc::now(),
                });
            }
        }

        outcome
    }

    async fn drive(
        &self,
        job_name: &str,
        run_id: u64,
        step: &mut Step,
        exec: &mut StepExecution,
    ) -> Result<(), StepError> {
        let mut chunk = Chunk::new(step.chunk_size);

        loop {
            // Chunk boundary: the buffer is empty right after a flush and
            // before the first read.
            if chunk.is_empty() && self.cancel.is_cancelled() {
                return Err(StepError::Cancelled);
            }

            match step.source.next().await? {
                None => {
                    if !chunk.is_empty() {
                        self.flush(job_name, run_id, step, exec, &mut chunk).await?;
                    }
                    return Ok(());
                }
                Some(item) => {
                    exec.inc_read();
                    match step.transform.apply(item)? {
                        None => exec.inc_skipped(),
                        Some(output) => {
                            chunk.push(output);
                            if chunk.is_full() {
                                self.flush(job_name, run_id, step, exec, &mut chunk).await?;
                            }
                        }
                    }
                }
            }
        }
    }

    /// Flushes the accumulated chunk as one atomic write. Counters are
    /// updated only after the sink commits.
    async fn flush(
        &self,
        job_name: &str,
        run_id: u64,
        step: &mut Step,
        exec: &mut StepExecution,
        chunk: &mut Chunk,
    ) -> Result<(), StepError> {
        let items = chunk.take();
        step.sink.write(&items).await?;
        exec.record_chunk(items.len() as u64);

        self.observer.on_event(&BatchEvent::ChunkFlushed {
            job: job_name.to_string(),
            run_id,
            step: step.name.clone(),
            rows: items.len() as u64,
            total_written: exec.write_count,
            timestamp: Utc::now(),
        });
        Ok(())
    }
}
