use serde_json::{Map, Value};

use crate::compile::{Pipeline, compile};
use crate::execute::execute;
use crate::registry::{Registry, default_rules};
use crate::types::{CompileError, Outcome, RuleBuilder, ValidationErrors};

/// Owns a rule schema and validates input records against it.
///
/// The schema compiles lazily on first use and the compiled pipelines
/// are reused for the validator's lifetime. Construction snapshots the
/// process-wide default registry, so rules registered globally later
/// (or on other instances) do not affect this one.
///
/// One instance is not meant for concurrent `validate` calls: the last
/// error snapshot is instance state. In concurrent code, call
/// [`prepare`](Validator::prepare) eagerly and give each worker its own
/// instance.
///
/// # Example
///
/// ```
/// use livr::Validator;
/// use serde_json::json;
///
/// let mut validator = Validator::new(json!({
///     "name": ["required", {"min_length": 2}],
///     "email": ["required", {"like": "^.+@.+$"}],
/// }));
///
/// let output = validator
///     .validate(&json!({"name": "Bo", "email": "bo@example.org"}))
///     .unwrap()
///     .expect("input is valid");
/// assert_eq!(output.get("name"), Some(&json!("Bo")));
///
/// assert!(validator.validate(&json!({"name": "Bo"})).unwrap().is_none());
/// assert_eq!(validator.errors().unwrap().code("email"), Some("REQUIRED"));
/// ```
pub struct Validator {
    schema: Value,
    registry: Registry,
    pipelines: Option<Vec<Pipeline>>,
    errors: Option<ValidationErrors>,
}

impl Validator {
    /// Create a validator for `schema` with the default rule set.
    #[must_use]
    pub fn new(schema: Value) -> Self {
        Self {
            schema,
            registry: default_rules(),
            pipelines: None,
            errors: None,
        }
    }

    /// Register an instance-scoped rule, overriding any default of the
    /// same name. Must happen before the schema compiles; registrations
    /// after the first `validate`/`prepare` call are ignored by the
    /// already-cached pipelines.
    pub fn register_rule(
        &mut self,
        name: impl Into<String>,
        builder: impl RuleBuilder + 'static,
    ) -> &mut Self {
        self.registry.register(name, builder);
        self
    }

    /// Overlay a whole registry of instance-scoped rules.
    pub fn register_rules(&mut self, rules: &Registry) -> &mut Self {
        self.registry.merge(rules);
        self
    }

    /// The rule registry this instance compiles against.
    #[must_use]
    pub fn rules(&self) -> &Registry {
        &self.registry
    }

    /// Compile the schema now instead of on first `validate`.
    ///
    /// Idempotent: a second call is a no-op and never rebuilds the
    /// pipelines.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] if the schema references an unknown
    /// rule or a rule rejects its arguments.
    pub fn prepare(&mut self) -> Result<(), CompileError> {
        if self.pipelines.is_none() {
            self.pipelines = Some(compile(&self.schema, &self.registry)?);
        }
        Ok(())
    }

    /// Validate one input record.
    ///
    /// `Ok(Some(output))` carries the sanitized output record: schema
    /// fields that were present in the input, with coerced values where
    /// a rule rewrote them. `Ok(None)` means validation failed; the
    /// details are in [`errors`](Validator::errors) until the next
    /// call. `Err` only surfaces the configuration error from lazy
    /// compilation — a routine validation failure is never an `Err`.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] if the schema had not compiled yet and
    /// fails to.
    pub fn validate(&mut self, data: &Value) -> Result<Option<Map<String, Value>>, CompileError> {
        self.prepare()?;
        let pipelines = self.pipelines.as_deref().unwrap_or(&[]);
        match execute(pipelines, data) {
            Outcome::Valid(output) => {
                self.errors = None;
                Ok(Some(output))
            }
            Outcome::Invalid(errors) => {
                self.errors = Some(errors);
                Ok(None)
            }
        }
    }

    /// Errors from the most recent `validate` call, or `None` if it
    /// succeeded (or never ran). Overwritten by the next call.
    #[must_use]
    pub fn errors(&self) -> Option<&ValidationErrors> {
        self.errors.as_ref()
    }
}
