mod compile;
mod execute;
mod parse;
mod registry;
mod rules;
mod types;

pub use registry::{Registry, default_rules, register_default_rule, register_default_rules};
pub use types::{CompileError, FieldRule, RuleBuilder, RuleCheck, ValidationErrors, Validator};
