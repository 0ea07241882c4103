use crate::file::csv::error::FileError;
use csv::StringRecord;
use engine_core::error::ConfigurationError;
use model::records::record::{FieldValue, Record};

/// Maps one raw field-value sequence into a record. The sole integration
/// point for supporting alternative schemas.
pub trait FieldSetMapper: Send + Sync {
    fn map(&self, raw: &StringRecord, record_number: u64) -> Result<Record, FileError>;
}

/// Assigns declared field names positionally; the file carries no header
/// row. A record whose arity differs from the declared names is malformed.
pub struct PositionalMapper {
    field_names: Vec<String>,
}

impl PositionalMapper {
    pub fn new(field_names: &[&str]) -> Result<Self, ConfigurationError> {
        if field_names.is_empty() {
            return Err(ConfigurationError::EmptyFieldNames);
        }
        Ok(PositionalMapper {
            field_names: field_names.iter().map(|n| n.to_string()).collect(),
        })
    }
}

impl FieldSetMapper for PositionalMapper {
    fn map(&self, raw: &StringRecord, record_number: u64) -> Result<Record, FileError> {
        if raw.len() != self.field_names.len() {
            return Err(FileError::Malformed {
                record_number,
                reason: format!(
                    "expected {} fields, found {}",
                    self.field_names.len(),
                    raw.len()
                ),
            });
        }

        let fields = self
            .field_names
            .iter()
            .zip(raw.iter())
            .map(|(name, value)| FieldValue::new(name, Some(value.to_string())))
            .collect();

        Ok(Record::new(fields))
    }
}
