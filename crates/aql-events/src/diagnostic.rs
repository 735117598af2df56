use std::fmt;

use serde_json::Value;

/// A rejected builder input, reported instead of raising an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDiagnostic {
    /// Human-readable summary, e.g. `Limit configuration is not valid`.
    pub message: String,
    /// The offending input as compact JSON text.
    pub value: String,
    /// The schema it was checked against as compact JSON text.
    pub schema: String,
}

impl QueryDiagnostic {
    pub fn new(message: impl Into<String>, value: &Value, schema: &Value) -> Self {
        Self {
            message: message.into(),
            value: value.to_string(),
            schema: schema.to_string(),
        }
    }
}

impl fmt::Display for QueryDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "AQL: {}: {}", self.message, self.value)?;
        writeln!(f, "     Provided object : {}", self.value)?;
        write!(f, "     Schema object   : {}", self.schema)
    }
}
