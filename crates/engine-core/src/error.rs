use thiserror::Error;

/// Errors raised while producing records from a source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The underlying resource produced a record that cannot be mapped into
    /// a well-formed item. Carries the 1-based record number.
    #[error("malformed record {record_number}: {reason}")]
    Format { record_number: u64, reason: String },

    /// Low-level I/O failure while reading the resource.
    #[error("source I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The source was used before `open()` or after `close()`.
    #[error("source is not open: {0}")]
    NotOpen(String),

    #[error("source error: {0}")]
    Other(String),
}

/// Errors raised by a transform. Fatal to the enclosing step by default;
/// no skip policy is configured at this layer.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("transform failed: {0}")]
    Failed(String),
}

/// Errors raised while persisting a chunk. The chunk's transaction is
/// all-or-nothing, so a `DataAccess` error means nothing from the chunk
/// was written.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("data access error: {source}")]
    DataAccess {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl SinkError {
    pub fn data_access<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SinkError::DataAccess {
            source: Box::new(source),
        }
    }
}

/// Assembly-time errors. Raised while building a job or step, never during
/// execution.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("invalid chunk size: {0} (must be greater than zero)")]
    InvalidChunkSize(usize),

    #[error("job '{0}' has no steps")]
    NoSteps(String),

    #[error("step '{step}' is missing its {component}")]
    MissingComponent {
        step: String,
        component: &'static str,
    },

    #[error("no field names declared for the record mapper")]
    EmptyFieldNames,

    #[error("no column bindings declared for table '{0}'")]
    NoColumnBindings(String),
}

/// A fatal step outcome. All variants mark the enclosing step FAILED except
/// `Cancelled`, which marks it STOPPED.
#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("step cancelled at a chunk boundary")]
    Cancelled,
}
