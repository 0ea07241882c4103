use crate::error::SourceError;
use async_trait::async_trait;
use model::records::record::Record;

/// Produces a lazy, forward-only, finite sequence of records pulled from an
/// underlying resource. Opened once per job execution and closed on every
/// exit path; not restartable mid-run.
#[async_trait]
pub trait RecordSource: Send {
    /// Acquires the underlying resource. Called once before the first
    /// `next()` of a run.
    async fn open(&mut self) -> Result<(), SourceError>;

    /// Returns the next record, or `Ok(None)` at end of sequence.
    async fn next(&mut self) -> Result<Option<Record>, SourceError>;

    /// Releases the underlying resource. Called on success and on failure.
    async fn close(&mut self) -> Result<(), SourceError>;
}
