mod common;
mod string;

use serde_json::Value;

use crate::Registry;

/// Registry seeded with the built-in rule set.
pub(crate) fn builtin() -> Registry {
    let mut registry = Registry::new();
    registry.register("required", common::required);
    registry.register("not_empty", common::not_empty);
    registry.register("one_of", string::one_of);
    registry.register("min_length", string::min_length);
    registry.register("max_length", string::max_length);
    registry.register("length_equal", string::length_equal);
    registry.register("length_between", string::length_between);
    registry.register("like", string::like);
    registry
}

/// Absent key, explicit null, and the empty string all count as "no
/// value". Every built-in except `required` passes on no value;
/// enforcing presence is `required`'s job alone.
pub(crate) fn no_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}
