//! End-to-end pipeline: flat CSV file -> upper-case transform -> in-memory
//! sink, exercising the real file connector against the chunk executor.

use crate::{
    job::JobBuilder,
    step::StepBuilder,
    tests::support::{CapturingSink, launcher},
};
use connectors::file::csv::{mapper::PositionalMapper, source::CsvFileSource};
use engine_core::transform::UppercaseTransform;
use model::execution::job::JobStatus;
use std::{io::Write, sync::Arc};
use tempfile::NamedTempFile;

fn csv_fixture(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "{contents}").expect("write fixture");
    file
}

#[tokio::test]
async fn imports_a_person_file_in_chunks() {
    let file = csv_fixture("Jane,Doe\nJohn,Smith\nJill,Hill\n");
    let mapper = Arc::new(PositionalMapper::new(&["firstName", "lastName"]).unwrap());
    let source = CsvFileSource::new(file.path().to_path_buf(), mapper);

    let sink = CapturingSink::new();
    let written = sink.written.clone();

    let step = StepBuilder::new("load-people")
        .source(source)
        .transform(UppercaseTransform)
        .sink(sink)
        .chunk_size(2)
        .build()
        .unwrap();
    let mut job = JobBuilder::new("import-people").step(step).build().unwrap();

    let execution = launcher().run(&mut job).await;

    assert_eq!(execution.status, JobStatus::Completed);
    let chunks = written.lock().unwrap();
    let sizes: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
    assert_eq!(sizes, vec![2, 1]);

    let first = &chunks[0][0];
    assert_eq!(first.get_value("firstName"), Some("JANE"));
    assert_eq!(first.get_value("lastName"), Some("DOE"));
}

#[tokio::test]
async fn malformed_line_fails_the_run_with_prior_chunks_intact() {
    let file = csv_fixture("Jane,Doe\nJohn,Smith\nbroken-line\nJill,Hill\n");
    let mapper = Arc::new(PositionalMapper::new(&["firstName", "lastName"]).unwrap());
    let source = CsvFileSource::new(file.path().to_path_buf(), mapper);

    let sink = CapturingSink::new();
    let written = sink.written.clone();

    let step = StepBuilder::new("load-people")
        .source(source)
        .transform(UppercaseTransform)
        .sink(sink)
        .chunk_size(2)
        .build()
        .unwrap();
    let mut job = JobBuilder::new("import-people").step(step).build().unwrap();

    let execution = launcher().run(&mut job).await;

    assert_eq!(execution.status, JobStatus::Failed);
    // Records 1-2 form a committed chunk; record 3 is malformed, so the
    // chunk containing it never reaches the sink.
    let sizes: Vec<usize> = written.lock().unwrap().iter().map(|c| c.len()).collect();
    assert_eq!(sizes, vec![2]);
    assert!(
        execution
            .exit_message
            .as_deref()
            .unwrap()
            .contains("malformed record 3")
    );
}
