use thiserror::Error;

/// Configuration errors raised while compiling a rule schema.
///
/// These are fatal: a schema that fails to compile never produces
/// per-record validation results.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("rule '{name}' is not registered")]
    RuleNotRegistered { name: String },

    #[error("rule schema must be an object, got {found}")]
    InvalidSchema { found: &'static str },

    #[error("invalid rule descriptor for field '{field}': expected a rule name or a name-to-args object, got {found}")]
    InvalidDescriptor { field: String, found: &'static str },

    #[error("invalid arguments for rule '{rule}': {reason}")]
    InvalidRuleArgs { rule: String, reason: String },
}
