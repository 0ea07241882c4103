use crate::file::csv::{error::FileError, mapper::FieldSetMapper};
use async_trait::async_trait;
use engine_core::{error::SourceError, source::RecordSource};
use model::records::record::Record;
use std::{fs::File, path::PathBuf, sync::Arc};
use tracing::{debug, info};

/// Reads delimited records from a flat file, one record per line, and maps
/// each through a pluggable [`FieldSetMapper`]. Forward-only; `open()` is
/// called once per job execution and rewinds to the start of the file.
pub struct CsvFileSource {
    path: PathBuf,
    delimiter: u8,
    mapper: Arc<dyn FieldSetMapper>,
    records: Option<csv::StringRecordsIntoIter<File>>,
    records_read: u64,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>, mapper: Arc<dyn FieldSetMapper>) -> Self {
        CsvFileSource {
            path: path.into(),
            delimiter: b',',
            mapper,
            records: None,
            records_read: 0,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn next_record(&mut self) -> Result<Option<Record>, FileError> {
        let records = self
            .records
            .as_mut()
            .ok_or_else(|| FileError::NotOpen(self.path.display().to_string()))?;

        match records.next() {
            None => Ok(None),
            Some(Ok(raw)) => {
                self.records_read += 1;
                let record = self.mapper.map(&raw, self.records_read)?;
                debug!(record_number = self.records_read, "Read record");
                Ok(Some(record))
            }
            Some(Err(e)) => Err(FileError::Malformed {
                record_number: self.records_read + 1,
                reason: e.to_string(),
            }),
        }
    }
}

#[async_trait]
impl RecordSource for CsvFileSource {
    async fn open(&mut self) -> Result<(), SourceError> {
        if !self.path.exists() {
            return Err(FileError::NotFound(self.path.display().to_string()).into());
        }

        // No header row is consumed; field names come from the mapper.
        // Flexible parsing lets the mapper report arity mismatches with the
        // offending record number instead of a bare driver error.
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_path(&self.path)
            .map_err(|e| SourceError::Other(e.to_string()))?;

        self.records = Some(reader.into_records());
        self.records_read = 0;
        info!(path = %self.path.display(), "Opened flat-file source");
        Ok(())
    }

    async fn next(&mut self) -> Result<Option<Record>, SourceError> {
        self.next_record().map_err(SourceError::from)
    }

    async fn close(&mut self) -> Result<(), SourceError> {
        self.records = None;
        debug!(path = %self.path.display(), records_read = self.records_read, "Closed flat-file source");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::csv::mapper::PositionalMapper;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn person_source(contents: &str) -> (NamedTempFile, CsvFileSource) {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, "{contents}").expect("write fixture");
        let mapper = Arc::new(PositionalMapper::new(&["firstName", "lastName"]).unwrap());
        let source = CsvFileSource::new(file.path().to_path_buf(), mapper);
        (file, source)
    }

    #[tokio::test]
    async fn reads_records_in_file_order() {
        let (_file, mut source) = person_source("Jane,Doe\nJohn,Smith\n");
        source.open().await.unwrap();

        let first = source.next().await.unwrap().unwrap();
        assert_eq!(first.get_value("firstName"), Some("Jane"));
        let second = source.next().await.unwrap().unwrap();
        assert_eq!(second.get_value("firstName"), Some("John"));
        assert!(source.next().await.unwrap().is_none());

        source.close().await.unwrap();
    }

    #[tokio::test]
    async fn malformed_record_reports_its_position() {
        let (_file, mut source) = person_source("Jane,Doe\nonly-one-field\n");
        source.open().await.unwrap();

        assert!(source.next().await.unwrap().is_some());
        let err = source.next().await.unwrap_err();
        match err {
            SourceError::Format { record_number, .. } => assert_eq!(record_number, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn next_before_open_is_an_error() {
        let (_file, mut source) = person_source("Jane,Doe\n");
        let err = source.next().await.unwrap_err();
        assert!(matches!(err, SourceError::NotOpen(_)));
    }

    #[tokio::test]
    async fn missing_file_fails_on_open() {
        let mapper = Arc::new(PositionalMapper::new(&["firstName", "lastName"]).unwrap());
        let mut source = CsvFileSource::new("/nonexistent/people.csv", mapper);
        assert!(source.open().await.is_err());
    }

    #[tokio::test]
    async fn reopen_rewinds_to_the_start() {
        let (_file, mut source) = person_source("Jane,Doe\n");
        source.open().await.unwrap();
        assert!(source.next().await.unwrap().is_some());
        source.close().await.unwrap();

        source.open().await.unwrap();
        let record = source.next().await.unwrap().unwrap();
        assert_eq!(record.get_value("firstName"), Some("Jane"));
    }
}
