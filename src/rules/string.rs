use regex::{Regex, RegexBuilder};
use serde_json::{Map, Value};

use crate::Registry;
use crate::parse::json_type;
use crate::types::{CompileError, FieldRule, RuleCheck};

use super::no_value;

/// Text view of a value for the string rules. Strings pass as-is;
/// numbers are coerced to their decimal rendering, with the coerced
/// string returned so the rule can write it to the output slot.
/// Everything else is not string-like.
fn text_of(value: &Value) -> Option<(String, Option<Value>)> {
    match value {
        Value::String(s) => Some((s.clone(), None)),
        Value::Number(n) => {
            let s = n.to_string();
            Some((s.clone(), Some(Value::String(s))))
        }
        _ => None,
    }
}

fn length_arg(rule: &str, args: &[Value], index: usize) -> Result<usize, CompileError> {
    let arg = args
        .get(index)
        .ok_or_else(|| CompileError::InvalidRuleArgs {
            rule: rule.to_owned(),
            reason: format!("missing length argument at position {index}"),
        })?;
    arg.as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| CompileError::InvalidRuleArgs {
            rule: rule.to_owned(),
            reason: format!(
                "length argument must be a non-negative integer, got {}",
                json_type(arg)
            ),
        })
}

struct OneOf {
    allowed: Vec<Value>,
}

impl FieldRule for OneOf {
    fn check(&self, value: Option<&Value>, _record: &Map<String, Value>) -> RuleCheck {
        if no_value(value) {
            return Ok(None);
        }
        let Some(value) = value else { return Ok(None) };
        if self.allowed.contains(value) {
            Ok(None)
        } else {
            Err("NOT_ALLOWED_VALUE".to_owned())
        }
    }
}

/// `one_of`: the value must equal one of the listed values. Accepts
/// both the flat form `{"one_of": ["a", "b"]}` and the legacy nested
/// form `{"one_of": [["a", "b"]]}`.
pub(crate) fn one_of(
    args: &[Value],
    _registry: &Registry,
) -> Result<Box<dyn FieldRule>, CompileError> {
    let allowed = match args {
        [Value::Array(values)] => values.clone(),
        _ => args.to_vec(),
    };
    Ok(Box::new(OneOf { allowed }))
}

struct MinLength {
    min: usize,
}

impl FieldRule for MinLength {
    fn check(&self, value: Option<&Value>, _record: &Map<String, Value>) -> RuleCheck {
        check_length(value, |len| {
            if len < self.min { Some("TOO_SHORT") } else { None }
        })
    }
}

pub(crate) fn min_length(
    args: &[Value],
    _registry: &Registry,
) -> Result<Box<dyn FieldRule>, CompileError> {
    let min = length_arg("min_length", args, 0)?;
    Ok(Box::new(MinLength { min }))
}

struct MaxLength {
    max: usize,
}

impl FieldRule for MaxLength {
    fn check(&self, value: Option<&Value>, _record: &Map<String, Value>) -> RuleCheck {
        check_length(value, |len| {
            if len > self.max { Some("TOO_LONG") } else { None }
        })
    }
}

pub(crate) fn max_length(
    args: &[Value],
    _registry: &Registry,
) -> Result<Box<dyn FieldRule>, CompileError> {
    let max = length_arg("max_length", args, 0)?;
    Ok(Box::new(MaxLength { max }))
}

struct LengthEqual {
    expected: usize,
}

impl FieldRule for LengthEqual {
    fn check(&self, value: Option<&Value>, _record: &Map<String, Value>) -> RuleCheck {
        check_length(value, |len| {
            if len < self.expected {
                Some("TOO_SHORT")
            } else if len > self.expected {
                Some("TOO_LONG")
            } else {
                None
            }
        })
    }
}

pub(crate) fn length_equal(
    args: &[Value],
    _registry: &Registry,
) -> Result<Box<dyn FieldRule>, CompileError> {
    let expected = length_arg("length_equal", args, 0)?;
    Ok(Box::new(LengthEqual { expected }))
}

struct LengthBetween {
    min: usize,
    max: usize,
}

impl FieldRule for LengthBetween {
    fn check(&self, value: Option<&Value>, _record: &Map<String, Value>) -> RuleCheck {
        check_length(value, |len| {
            if len < self.min {
                Some("TOO_SHORT")
            } else if len > self.max {
                Some("TOO_LONG")
            } else {
                None
            }
        })
    }
}

pub(crate) fn length_between(
    args: &[Value],
    _registry: &Registry,
) -> Result<Box<dyn FieldRule>, CompileError> {
    let min = length_arg("length_between", args, 0)?;
    let max = length_arg("length_between", args, 1)?;
    Ok(Box::new(LengthBetween { min, max }))
}

/// Shared skeleton of the length rules: skip no-value, demand a
/// string-like value, count Unicode scalar values, and pass any
/// numeric coercion through to the output slot.
fn check_length(
    value: Option<&Value>,
    verdict: impl Fn(usize) -> Option<&'static str>,
) -> RuleCheck {
    if no_value(value) {
        return Ok(None);
    }
    let Some(value) = value else { return Ok(None) };
    let Some((text, replacement)) = text_of(value) else {
        return Err("FORMAT_ERROR".to_owned());
    };
    match verdict(text.chars().count()) {
        Some(code) => Err(code.to_owned()),
        None => Ok(replacement),
    }
}

struct Like {
    pattern: Regex,
}

impl FieldRule for Like {
    fn check(&self, value: Option<&Value>, _record: &Map<String, Value>) -> RuleCheck {
        if no_value(value) {
            return Ok(None);
        }
        let Some(value) = value else { return Ok(None) };
        let Some((text, replacement)) = text_of(value) else {
            return Err("FORMAT_ERROR".to_owned());
        };
        if self.pattern.is_match(&text) {
            Ok(replacement)
        } else {
            Err("WRONG_FORMAT".to_owned())
        }
    }
}

/// `like`: the value must match the given pattern. An optional second
/// argument `"i"` makes the match case-insensitive. The pattern is
/// compiled here, so a malformed pattern is a configuration error
/// rather than a per-record result.
pub(crate) fn like(
    args: &[Value],
    _registry: &Registry,
) -> Result<Box<dyn FieldRule>, CompileError> {
    let pattern = match args.first() {
        Some(Value::String(pattern)) => pattern,
        Some(other) => {
            return Err(CompileError::InvalidRuleArgs {
                rule: "like".to_owned(),
                reason: format!("pattern must be a string, got {}", json_type(other)),
            });
        }
        None => {
            return Err(CompileError::InvalidRuleArgs {
                rule: "like".to_owned(),
                reason: "missing pattern argument".to_owned(),
            });
        }
    };

    let mut case_insensitive = false;
    if let Some(flags) = args.get(1) {
        match flags {
            Value::String(flags) if flags == "i" => case_insensitive = true,
            other => {
                return Err(CompileError::InvalidRuleArgs {
                    rule: "like".to_owned(),
                    reason: format!("unsupported flags argument {other}"),
                });
            }
        }
    }

    let pattern = RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|err| CompileError::InvalidRuleArgs {
            rule: "like".to_owned(),
            reason: err.to_string(),
        })?;
    Ok(Box::new(Like { pattern }))
}
