//! Shared in-memory doubles for the engine tests.

use crate::{
    job::{Job, JobBuilder, JobLauncher},
    step::StepBuilder,
};
use async_trait::async_trait;
use engine_core::{
    error::{SinkError, SourceError, TransformError},
    listener::JobListener,
    observer::{ExecutionObserver, NullObserver},
    run_id::RunIdSequence,
    sink::RecordSink,
    source::RecordSource,
    transform::{RecordTransform, UppercaseTransform},
};
use model::{
    events::BatchEvent,
    execution::job::{JobExecution, JobStatus},
    records::record::Record,
};
use std::sync::{
    Arc,
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

/// In-memory source; optionally raises a format error when asked to
/// produce record `fail_at` (1-indexed). Reopening rewinds to the start.
pub struct MockSource {
    items: Vec<Record>,
    fail_at: Option<usize>,
    cursor: usize,
    open: bool,
    pub close_count: Arc<AtomicUsize>,
}

impl MockSource {
    pub fn new(items: Vec<Record>) -> Self {
        MockSource {
            items,
            fail_at: None,
            cursor: 0,
            open: false,
            close_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing_at(mut self, record_number: usize) -> Self {
        self.fail_at = Some(record_number);
        self
    }
}

#[async_trait]
impl RecordSource for MockSource {
    async fn open(&mut self) -> Result<(), SourceError> {
        self.cursor = 0;
        self.open = true;
        Ok(())
    }

    async fn next(&mut self) -> Result<Option<Record>, SourceError> {
        if !self.open {
            return Err(SourceError::NotOpen("mock source".to_string()));
        }
        if self.cursor >= self.items.len() {
            return Ok(None);
        }

        let record_number = self.cursor + 1;
        if self.fail_at == Some(record_number) {
            return Err(SourceError::Format {
                record_number: record_number as u64,
                reason: "injected parse failure".to_string(),
            });
        }

        let item = self.items[self.cursor].clone();
        self.cursor += 1;
        Ok(Some(item))
    }

    async fn close(&mut self) -> Result<(), SourceError> {
        self.open = false;
        self.close_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// In-memory sink recording every committed chunk; optionally fails the
/// n-th write attempt (1-indexed) without retry.
pub struct CapturingSink {
    pub written: Arc<Mutex<Vec<Vec<Record>>>>,
    pub attempts: Arc<AtomicUsize>,
    fail_on_attempt: Option<usize>,
}

impl CapturingSink {
    pub fn new() -> Self {
        CapturingSink {
            written: Arc::new(Mutex::new(Vec::new())),
            attempts: Arc::new(AtomicUsize::new(0)),
            fail_on_attempt: None,
        }
    }

    pub fn failing_on_attempt(mut self, attempt: usize) -> Self {
        self.fail_on_attempt = Some(attempt);
        self
    }
}

#[async_trait]
impl RecordSink for CapturingSink {
    async fn write(&mut self, records: &[Record]) -> Result<(), SinkError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_attempt == Some(attempt) {
            return Err(SinkError::data_access(std::io::Error::other(
                "injected write failure",
            )));
        }
        self.written.lock().unwrap().push(records.to_vec());
        Ok(())
    }
}

/// Counts lifecycle invocations and the statuses seen by `after_job`.
#[derive(Default)]
pub struct CountingListener {
    pub before_calls: AtomicUsize,
    pub after_calls: AtomicUsize,
    pub final_statuses: Mutex<Vec<JobStatus>>,
}

#[async_trait]
impl JobListener for CountingListener {
    async fn before_job(&self, _execution: &JobExecution) {
        self.before_calls.fetch_add(1, Ordering::SeqCst);
    }

    async fn after_job(&self, execution: &JobExecution) {
        self.after_calls.fetch_add(1, Ordering::SeqCst);
        self.final_statuses.lock().unwrap().push(execution.status);
    }
}

#[derive(Default)]
pub struct CollectingObserver {
    pub events: Mutex<Vec<BatchEvent>>,
}

impl ExecutionObserver for CollectingObserver {
    fn on_event(&self, event: &BatchEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Drops records whose `lastName` field is empty.
pub struct SkipEmptyLastName;

impl RecordTransform for SkipEmptyLastName {
    fn apply(&self, record: Record) -> Result<Option<Record>, TransformError> {
        match record.get_value("lastName") {
            Some("") => Ok(None),
            _ => Ok(Some(record)),
        }
    }
}

pub fn people(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| Record::from_pairs(&[("firstName", &format!("name{i}")), ("lastName", "Doe")]))
        .collect()
}

pub fn import_job(source: MockSource, sink: CapturingSink, chunk_size: usize) -> Job {
    let step = StepBuilder::new("load-people")
        .source(source)
        .transform(UppercaseTransform)
        .sink(sink)
        .chunk_size(chunk_size)
        .build()
        .expect("step assembly");
    JobBuilder::new("import-people")
        .step(step)
        .build()
        .expect("job assembly")
}

pub fn launcher() -> JobLauncher {
    JobLauncher::new(Arc::new(RunIdSequence::starting_at(0))).with_observer(Arc::new(NullObserver))
}
