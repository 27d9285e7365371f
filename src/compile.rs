use serde_json::Value;

use crate::Registry;
use crate::parse::{field_descriptors, json_type, parse_rule};
use crate::types::{CompileError, FieldRule, RuleBuilder};

/// Compiled checks for one field, in declared order.
pub(crate) struct Pipeline {
    pub(crate) field: String,
    pub(crate) rules: Vec<Box<dyn FieldRule>>,
}

/// Compile a rule schema into per-field pipelines.
///
/// Pipelines come back in the schema's declaration order, one per
/// field, each with its own isolated rule vector. Any unknown rule
/// name or unusable argument aborts the whole compilation.
pub(crate) fn compile(schema: &Value, registry: &Registry) -> Result<Vec<Pipeline>, CompileError> {
    let Value::Object(fields) = schema else {
        return Err(CompileError::InvalidSchema {
            found: json_type(schema),
        });
    };

    let mut pipelines = Vec::with_capacity(fields.len());
    for (field, spec) in fields {
        let mut rules: Vec<Box<dyn FieldRule>> = Vec::new();
        for descriptor in field_descriptors(spec) {
            let parsed = parse_rule(field, descriptor)?;
            let builder =
                registry
                    .get(&parsed.name)
                    .ok_or_else(|| CompileError::RuleNotRegistered {
                        name: parsed.name.clone(),
                    })?;
            rules.push(builder.build(&parsed.args, registry)?);
        }
        pipelines.push(Pipeline {
            field: field.clone(),
            rules,
        });
    }

    Ok(pipelines)
}
