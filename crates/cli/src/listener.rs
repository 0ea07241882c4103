use async_trait::async_trait;
use engine_core::listener::JobListener;
use model::execution::job::{JobExecution, JobStatus};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_postgres::Client;
use tracing::{error, info, warn};

/// Logs run start and, when the run completed, queries the persisted
/// output and logs each record for verification. The verification query
/// never runs for a failed or stopped run.
pub struct PersonReportListener {
    client: Arc<Mutex<Client>>,
}

impl PersonReportListener {
    pub fn new(client: Arc<Mutex<Client>>) -> Self {
        PersonReportListener { client }
    }
}

fn should_verify(status: JobStatus) -> bool {
    status == JobStatus::Completed
}

#[async_trait]
impl JobListener for PersonReportListener {
    async fn before_job(&self, execution: &JobExecution) {
        info!(job = %execution.job_name, run_id = execution.id, "Job starting");
    }

    async fn after_job(&self, execution: &JobExecution) {
        if !should_verify(execution.status) {
            warn!(
                run_id = execution.id,
                status = %execution.status,
                "Run did not complete; skipping result verification"
            );
            return;
        }

        info!(run_id = execution.id, "Job finished, verifying the results");
        let client = self.client.lock().await;
        match client
            .query("SELECT first_name, last_name FROM people", &[])
            .await
        {
            Ok(rows) => {
                for row in rows {
                    let first_name: &str = row.get(0);
                    let last_name: &str = row.get(1);
                    info!(first_name, last_name, "Found person in the database");
                }
            }
            Err(e) => error!(error = %e, "Verification query failed"),
        }
    }
}
