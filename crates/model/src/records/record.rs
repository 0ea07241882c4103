use serde::{Deserialize, Serialize};

/// One named text field of a record. `None` maps to SQL NULL at the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValue {
    pub name: String,
    pub value: Option<String>,
}

impl FieldValue {
    pub fn new(name: &str, value: Option<String>) -> Self {
        FieldValue {
            name: name.to_string(),
            value,
        }
    }
}

/// One logical item flowing through the pipeline. Immutable once built;
/// ownership transfers stage to stage, no aliasing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub fields: Vec<FieldValue>,
}

impl Record {
    pub fn new(fields: Vec<FieldValue>) -> Self {
        Record { fields }
    }

    /// Builds a record from `(name, value)` pairs, mostly for tests and
    /// small fixtures.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Record {
            fields: pairs
                .iter()
                .map(|(name, value)| FieldValue::new(name, Some(value.to_string())))
                .collect(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(field))
    }

    pub fn get_value(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(|f| f.value.as_deref())
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let record = Record::from_pairs(&[("firstName", "Jane"), ("lastName", "Doe")]);
        assert_eq!(record.get_value("firstname"), Some("Jane"));
        assert_eq!(record.get_value("LASTNAME"), Some("Doe"));
        assert_eq!(record.get_value("middleName"), None);
    }

    #[test]
    fn equality_is_field_equality() {
        let a = Record::from_pairs(&[("firstName", "Jane")]);
        let b = Record::from_pairs(&[("firstName", "Jane")]);
        assert_eq!(a, b);
    }
}
