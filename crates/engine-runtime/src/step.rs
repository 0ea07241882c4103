use engine_core::{
    error::ConfigurationError,
    sink::RecordSink,
    source::RecordSource,
    transform::{IdentityTransform, RecordTransform},
};

/// One read-process-write stage of a job: a source, a transform, a sink and
/// the chunk size that bounds each transactional flush. Assembled by
/// explicit construction; there is no runtime registry.
pub struct Step {
    pub name: String,
    pub(crate) source: Box<dyn RecordSource>,
    pub(crate) transform: Box<dyn RecordTransform>,
    pub(crate) sink: Box<dyn RecordSink>,
    pub(crate) chunk_size: usize,
}

pub struct StepBuilder {
    name: String,
    source: Option<Box<dyn RecordSource>>,
    transform: Option<Box<dyn RecordTransform>>,
    sink: Option<Box<dyn RecordSink>>,
    chunk_size: usize,
}

impl StepBuilder {
    pub fn new(name: &str) -> Self {
        StepBuilder {
            name: name.to_string(),
            source: None,
            transform: None,
            sink: None,
            chunk_size: 10,
        }
    }

    pub fn source(mut self, source: impl RecordSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Optional; steps without a transform pass records through unchanged.
    pub fn transform(mut self, transform: impl RecordTransform + 'static) -> Self {
        self.transform = Some(Box::new(transform));
        self
    }

    pub fn sink(mut self, sink: impl RecordSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn build(self) -> Result<Step, ConfigurationError> {
        if self.chunk_size == 0 {
            return Err(ConfigurationError::InvalidChunkSize(self.chunk_size));
        }
        let source = self
            .source
            .ok_or_else(|| ConfigurationError::MissingComponent {
                step: self.name.clone(),
                component: "source",
            })?;
        let sink = self
            .sink
            .ok_or_else(|| ConfigurationError::MissingComponent {
                step: self.name.clone(),
                component: "sink",
            })?;

        Ok(Step {
            name: self.name,
            source,
            transform: self
                .transform
                .unwrap_or_else(|| Box::new(IdentityTransform)),
            sink,
            chunk_size: self.chunk_size,
        })
    }
}
