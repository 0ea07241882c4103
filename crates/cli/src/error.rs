use engine_core::error::ConfigurationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// PostgreSQL driver error during connect or schema bootstrap.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("invalid job configuration: {0}")]
    Configuration(#[from] ConfigurationError),
}
