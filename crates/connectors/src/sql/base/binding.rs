use engine_core::error::ConfigurationError;

/// One explicit field-to-column mapping entry, supplied as configuration
/// data at construction time. No reflection, no runtime discovery.
#[derive(Debug, Clone)]
pub struct ColumnBinding {
    pub field: String,
    pub column: String,
}

impl ColumnBinding {
    pub fn new(field: &str, column: &str) -> Self {
        ColumnBinding {
            field: field.to_string(),
            column: column.to_string(),
        }
    }
}

/// A parameterized insert statement rendered once from the binding table.
#[derive(Debug, Clone)]
pub struct InsertTemplate {
    pub table: String,
    pub bindings: Vec<ColumnBinding>,
    pub sql: String,
}

impl InsertTemplate {
    pub fn new(table: &str, bindings: Vec<ColumnBinding>) -> Result<Self, ConfigurationError> {
        if bindings.is_empty() {
            return Err(ConfigurationError::NoColumnBindings(table.to_string()));
        }

        let columns = bindings
            .iter()
            .map(|b| b.column.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=bindings.len())
            .map(|i| format!("${i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("INSERT INTO {table} ({columns}) VALUES ({placeholders})");

        Ok(InsertTemplate {
            table: table.to_string(),
            bindings,
            sql,
        })
    }
}
