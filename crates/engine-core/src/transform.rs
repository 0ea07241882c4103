use crate::error::TransformError;
use model::records::record::{FieldValue, Record};
use tracing::debug;

/// Maps one input record to zero-or-one output record. Pure and
/// side-effect-free aside from logging; `Ok(None)` skips the item.
pub trait RecordTransform: Send + Sync {
    fn apply(&self, record: Record) -> Result<Option<Record>, TransformError>;
}

/// Passes every record through unchanged.
pub struct IdentityTransform;

impl RecordTransform for IdentityTransform {
    fn apply(&self, record: Record) -> Result<Option<Record>, TransformError> {
        Ok(Some(record))
    }
}

/// Upper-cases every non-null text field, producing a new record. The input
/// is never mutated and the mapping is idempotent.
pub struct UppercaseTransform;

impl RecordTransform for UppercaseTransform {
    fn apply(&self, record: Record) -> Result<Option<Record>, TransformError> {
        let fields = record
            .fields
            .iter()
            .map(|field| FieldValue {
                name: field.name.clone(),
                value: field.value.as_ref().map(|v| v.to_uppercase()),
            })
            .collect();

        let transformed = Record::new(fields);
        debug!(input = ?record, output = ?transformed, "Upper-cased record");
        Ok(Some(transformed))
    }
}
