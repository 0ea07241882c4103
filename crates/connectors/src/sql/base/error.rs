use engine_core::error::SinkError;
use thiserror::Error;

/// Errors from the database layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Any SQL driver error, including transaction begin/commit failures.
    #[error("SQL error: {0}")]
    Sql(#[from] tokio_postgres::Error),

    /// A record reached the sink without a value for a bound field.
    #[error("record has no field '{field}' bound to column '{column}'")]
    MissingField { field: String, column: String },
}

impl From<DbError> for SinkError {
    fn from(err: DbError) -> Self {
        SinkError::data_access(err)
    }
}
