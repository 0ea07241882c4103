use async_trait::async_trait;
use model::execution::job::JobExecution;

/// Observer hooks invoked at job lifecycle boundaries. Observational only:
/// return values cannot affect the execution outcome, and when several
/// listeners are registered their invocation order is unspecified.
#[async_trait]
pub trait JobListener: Send + Sync {
    async fn before_job(&self, _execution: &JobExecution) {}

    /// Invoked exactly once per run with the final execution, whatever the
    /// terminal status.
    async fn after_job(&self, _execution: &JobExecution) {}
}
