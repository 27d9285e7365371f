mod error;
mod outcome;
mod rule;
mod validator;

pub use error::CompileError;
pub use outcome::ValidationErrors;
pub use rule::{FieldRule, RuleBuilder, RuleCheck};
pub use validator::Validator;

pub(crate) use outcome::Outcome;
