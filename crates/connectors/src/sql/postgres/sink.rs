use crate::sql::base::{
    binding::{ColumnBinding, InsertTemplate},
    error::DbError,
};
use async_trait::async_trait;
use engine_core::{
    error::{ConfigurationError, SinkError},
    sink::RecordSink,
};
use model::records::record::Record;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_postgres::Client;
use tracing::{debug, info};

/// Writes each chunk with a parameterized insert inside one transaction.
/// The transaction owns the connection for the duration of the flush; a
/// driver error drops the transaction, rolling the whole chunk back.
///
/// The client is shared behind a mutex so lifecycle listeners can reuse the
/// same connection for post-run verification queries.
pub struct PgRecordSink {
    client: Arc<Mutex<Client>>,
    template: InsertTemplate,
}

impl PgRecordSink {
    pub fn new(
        client: Arc<Mutex<Client>>,
        table: &str,
        bindings: Vec<ColumnBinding>,
    ) -> Result<Self, ConfigurationError> {
        let template = InsertTemplate::new(table, bindings)?;
        Ok(PgRecordSink { client, template })
    }

    async fn write_chunk(&self, records: &[Record]) -> Result<(), DbError> {
        let mut client = self.client.lock().await;
        let tx = client.transaction().await?;
        let statement = tx.prepare(&self.template.sql).await?;

        for record in records {
            let params = bind_params(&self.template, record)?;
            let param_refs: Vec<&(dyn tokio_postgres::types::ToSql + Sync)> = params
                .iter()
                .map(|p| p as &(dyn tokio_postgres::types::ToSql + Sync))
                .collect();
            tx.execute(&statement, &param_refs).await?;
        }

        tx.commit().await?;
        debug!(table = %self.template.table, rows = records.len(), "Committed chunk");
        Ok(())
    }
}

/// Extracts parameter values in column order. A record missing a bound
/// field is a data error; a present-but-null field binds as SQL NULL.
fn bind_params<'a>(
    template: &InsertTemplate,
    record: &'a Record,
) -> Result<Vec<Option<&'a str>>, DbError> {
    template
        .bindings
        .iter()
        .map(|binding| {
            record
                .get(&binding.field)
                .map(|f| f.value.as_deref())
                .ok_or_else(|| DbError::MissingField {
                    field: binding.field.clone(),
                    column: binding.column.clone(),
                })
        })
        .collect()
}

#[async_trait]
impl RecordSink for PgRecordSink {
    async fn write(&mut self, records: &[Record]) -> Result<(), SinkError> {
        if records.is_empty() {
            return Ok(());
        }

        info!(
            table = %self.template.table,
            rows = records.len(),
            "Writing chunk to destination"
        );
        self.write_chunk(records).await.map_err(SinkError::from)
    }
}
