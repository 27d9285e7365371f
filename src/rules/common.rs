use serde_json::{Map, Value};

use crate::Registry;
use crate::types::{CompileError, FieldRule, RuleCheck};

use super::no_value;

struct Required;

impl FieldRule for Required {
    fn check(&self, value: Option<&Value>, _record: &Map<String, Value>) -> RuleCheck {
        if no_value(value) {
            Err("REQUIRED".to_owned())
        } else {
            Ok(None)
        }
    }
}

/// `required`: the field must be present with a non-null, non-empty value.
pub(crate) fn required(
    _args: &[Value],
    _registry: &Registry,
) -> Result<Box<dyn FieldRule>, CompileError> {
    Ok(Box::new(Required))
}

struct NotEmpty;

impl FieldRule for NotEmpty {
    fn check(&self, value: Option<&Value>, _record: &Map<String, Value>) -> RuleCheck {
        match value {
            Some(Value::String(s)) if s.is_empty() => Err("CANNOT_BE_EMPTY".to_owned()),
            _ => Ok(None),
        }
    }
}

/// `not_empty`: an absent or null field is fine, but a present value
/// must not be the empty string.
pub(crate) fn not_empty(
    _args: &[Value],
    _registry: &Registry,
) -> Result<Box<dyn FieldRule>, CompileError> {
    Ok(Box::new(NotEmpty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn build(builder: fn(&[Value], &Registry) -> Result<Box<dyn FieldRule>, CompileError>)
    -> Box<dyn FieldRule> {
        builder(&[], &Registry::new()).unwrap()
    }

    #[test]
    fn required_rejects_no_value() {
        let rule = build(required);
        let record = Map::new();
        assert_eq!(rule.check(None, &record), Err("REQUIRED".to_owned()));
        assert_eq!(
            rule.check(Some(&json!(null)), &record),
            Err("REQUIRED".to_owned())
        );
        assert_eq!(
            rule.check(Some(&json!("")), &record),
            Err("REQUIRED".to_owned())
        );
    }

    #[test]
    fn required_accepts_falsy_but_present_values() {
        let rule = build(required);
        let record = Map::new();
        assert_eq!(rule.check(Some(&json!(0)), &record), Ok(None));
        assert_eq!(rule.check(Some(&json!(false)), &record), Ok(None));
        assert_eq!(rule.check(Some(&json!("x")), &record), Ok(None));
    }

    #[test]
    fn not_empty_rejects_only_empty_string() {
        let rule = build(not_empty);
        let record = Map::new();
        assert_eq!(
            rule.check(Some(&json!("")), &record),
            Err("CANNOT_BE_EMPTY".to_owned())
        );
        assert_eq!(rule.check(None, &record), Ok(None));
        assert_eq!(rule.check(Some(&json!(null)), &record), Ok(None));
        assert_eq!(rule.check(Some(&json!("x")), &record), Ok(None));
        assert_eq!(rule.check(Some(&json!(0)), &record), Ok(None));
    }
}
