use serde_json::Value;

use crate::types::CompileError;

/// One rule descriptor normalized to canonical `(name, args)` form.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedRule {
    pub(crate) name: String,
    pub(crate) args: Vec<Value>,
}

/// Normalize a rule descriptor.
///
/// A bare string is a rule name with no arguments. An object's first
/// entry is the rule name and its argument payload; a non-array payload
/// becomes a one-element argument sequence, so `{"min_length": 4}` and
/// `{"min_length": [4]}` mean the same thing.
pub(crate) fn parse_rule(field: &str, descriptor: &Value) -> Result<ParsedRule, CompileError> {
    match descriptor {
        Value::String(name) => Ok(ParsedRule {
            name: name.clone(),
            args: Vec::new(),
        }),
        Value::Object(entries) => {
            let (name, payload) =
                entries
                    .iter()
                    .next()
                    .ok_or_else(|| CompileError::InvalidDescriptor {
                        field: field.to_owned(),
                        found: "empty object",
                    })?;
            let args = match payload {
                Value::Array(items) => items.clone(),
                scalar => vec![scalar.clone()],
            };
            Ok(ParsedRule {
                name: name.clone(),
                args,
            })
        }
        other => Err(CompileError::InvalidDescriptor {
            field: field.to_owned(),
            found: json_type(other),
        }),
    }
}

/// Uniform view of a field rule spec: a non-array spec (single
/// descriptor) is wrapped into a one-element sequence.
pub(crate) fn field_descriptors(spec: &Value) -> Vec<&Value> {
    match spec {
        Value::Array(items) => items.iter().collect(),
        single => vec![single],
    }
}

/// JSON type name for error messages.
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
