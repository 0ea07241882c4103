use crate::error::SinkError;
use async_trait::async_trait;
use model::records::record::Record;

/// Durably persists one chunk of records as a single unit. Implementations
/// must guarantee the write is atomic: either every record in the slice is
/// persisted or none are.
#[async_trait]
pub trait RecordSink: Send {
    async fn write(&mut self, records: &[Record]) -> Result<(), SinkError>;
}
