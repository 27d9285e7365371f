use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};

/// Failure half of a validation run. Plain data, never an exception path:
/// callers distinguish success from failure structurally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrors {
    /// The input was not a record-shaped object, so no per-field detail
    /// exists. Reported instead of a field map, never alongside one.
    Format,
    /// First failing rule code per field. A field's later rules are
    /// never consulted once one has failed; other fields still run.
    Fields(HashMap<String, String>),
}

impl ValidationErrors {
    #[must_use]
    pub fn is_format(&self) -> bool {
        matches!(self, ValidationErrors::Format)
    }

    /// Per-field error codes, or `None` for a format error.
    #[must_use]
    pub fn fields(&self) -> Option<&HashMap<String, String>> {
        match self {
            ValidationErrors::Format => None,
            ValidationErrors::Fields(fields) => Some(fields),
        }
    }

    /// The error code recorded for one field, if any.
    #[must_use]
    pub fn code(&self, field: &str) -> Option<&str> {
        self.fields()?.get(field).map(String::as_str)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationErrors::Format => write!(f, "FORMAT_ERROR"),
            ValidationErrors::Fields(fields) => {
                let mut entries: Vec<String> = fields
                    .iter()
                    .map(|(field, code)| format!("{field}: {code}"))
                    .collect();
                entries.sort();
                write!(f, "{}", entries.join(", "))
            }
        }
    }
}

/// Serializes the way LIVR errors travel over the wire: the format
/// marker as the bare string `"FORMAT_ERROR"`, field errors as an
/// object of field-to-code entries.
impl serde::Serialize for ValidationErrors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            ValidationErrors::Format => serializer.serialize_str("FORMAT_ERROR"),
            ValidationErrors::Fields(fields) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (field, code) in fields {
                    map.serialize_entry(field, code)?;
                }
                map.end()
            }
        }
    }
}

/// Result of executing compiled pipelines against one input record.
#[derive(Debug)]
pub(crate) enum Outcome {
    Valid(Map<String, Value>),
    Invalid(ValidationErrors),
}
