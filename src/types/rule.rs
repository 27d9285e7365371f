use serde_json::{Map, Value};

use crate::Registry;
use crate::types::CompileError;

/// Result of checking one rule against one field value.
///
/// `Ok(None)` passes the value through unchanged, `Ok(Some(v))` passes
/// with `v` as the coerced replacement (the next rule in the pipeline
/// sees `v`, and `v` lands in the output record), `Err(code)` fails the
/// field with an opaque error code such as `"REQUIRED"`.
pub type RuleCheck = Result<Option<Value>, String>;

/// One compiled check in a field's pipeline.
///
/// `value` is the field's current value: the raw input value, or the
/// replacement written by an earlier rule in the same pipeline. `None`
/// means the field key was absent from the input. `record` is the full
/// input record, so rules can compare across fields.
pub trait FieldRule: Send + Sync {
    fn check(&self, value: Option<&Value>, record: &Map<String, Value>) -> RuleCheck;
}

impl<F> FieldRule for F
where
    F: Fn(Option<&Value>, &Map<String, Value>) -> RuleCheck + Send + Sync,
{
    fn check(&self, value: Option<&Value>, record: &Map<String, Value>) -> RuleCheck {
        self(value, record)
    }
}

/// Factory registered under a rule name.
///
/// `args` is the descriptor's normalized argument sequence. `registry`
/// is the registry the schema is being compiled against, so composite
/// rules can resolve other rule names and delegate to them.
pub trait RuleBuilder: Send + Sync {
    /// Build a [`FieldRule`] from the descriptor arguments.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] when the arguments are unusable
    /// (e.g. a malformed `like` pattern). This aborts schema
    /// compilation; it is never surfaced as a per-record result.
    fn build(
        &self,
        args: &[Value],
        registry: &Registry,
    ) -> Result<Box<dyn FieldRule>, CompileError>;
}

impl<F> RuleBuilder for F
where
    F: Fn(&[Value], &Registry) -> Result<Box<dyn FieldRule>, CompileError> + Send + Sync,
{
    fn build(
        &self,
        args: &[Value],
        registry: &Registry,
    ) -> Result<Box<dyn FieldRule>, CompileError> {
        self(args, registry)
    }
}
