use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::compile::Pipeline;
use crate::types::{FieldRule, Outcome, ValidationErrors};

/// Run compiled pipelines against one input record.
///
/// Fields are processed in schema order. Within a field the current
/// value threads through the pipeline and the first error code stops
/// that field's remaining rules; fields fail independently of each
/// other. A passing field appears in the output only if its key was
/// present in the input, carrying the last coerced replacement if any
/// rule wrote one.
pub(crate) fn execute(pipelines: &[Pipeline], data: &Value) -> Outcome {
    let Value::Object(record) = data else {
        return Outcome::Invalid(ValidationErrors::Format);
    };

    let mut errors: HashMap<String, String> = HashMap::new();
    let mut output = Map::new();

    for pipeline in pipelines {
        let raw = record.get(&pipeline.field);
        let mut coerced: Option<Value> = None;
        let mut failed = false;

        for rule in &pipeline.rules {
            let current = coerced.as_ref().or(raw);
            match rule.check(current, record) {
                Ok(None) => {}
                Ok(Some(replacement)) => coerced = Some(replacement),
                Err(code) => {
                    errors.insert(pipeline.field.clone(), code);
                    failed = true;
                    break;
                }
            }
        }

        if failed {
            continue;
        }
        if let Some(raw) = raw {
            let value = coerced.unwrap_or_else(|| raw.clone());
            output.insert(pipeline.field.clone(), value);
        }
    }

    if errors.is_empty() {
        Outcome::Valid(output)
    } else {
        Outcome::Invalid(ValidationErrors::Fields(errors))
    }
}
