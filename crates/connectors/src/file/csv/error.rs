use engine_core::error::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("file not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// A record that cannot be mapped into an item. Carries the 1-based
    /// record number within the file.
    #[error("malformed record {record_number}: {reason}")]
    Malformed { record_number: u64, reason: String },

    #[error("source is not open: {0}")]
    NotOpen(String),
}

impl From<FileError> for SourceError {
    fn from(err: FileError) -> Self {
        match err {
            FileError::Io(io) => SourceError::Io(io),
            FileError::Malformed {
                record_number,
                reason,
            } => SourceError::Format {
                record_number,
                reason,
            },
            FileError::NotOpen(msg) => SourceError::NotOpen(msg),
            other => SourceError::Other(other.to_string()),
        }
    }
}
