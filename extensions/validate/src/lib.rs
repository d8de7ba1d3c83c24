//! Validation rule engine for junction form data.
//!
//! Rules implement [`ValidationRule`] and are checked field-by-field by the
//! [`Validator`]. Rules can be built directly or parsed from compact string
//! specs (`"required"`, `"less_than:5"`, `"required_when:age,>=,18"`), the
//! form route definitions usually use.
//!
//! The router core knows nothing about any of this; validation runs inside
//! actions and middlewares, and a failed validation is theirs to translate
//! into a response.

mod parse;
mod rules;
mod validator;

pub use parse::{parse_rule, parse_rules};
pub use rules::{
    Email, LessThan, Number, Operator, Required, RequiredWhen, RequiredWith, ValidationRule,
};
pub use validator::{Messages, ValidationError, Validator};

/// Errors raised while building rules, not while applying them.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidateError {
    #[error("can't parse an empty string into a rule")]
    EmptyRule,

    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    #[error("rule `{rule}` expects {expected} parameter(s), but {given} were given")]
    WrongParameterCount {
        rule: String,
        expected: usize,
        given: usize,
    },

    #[error("unknown required_when operator `{0}`")]
    UnknownOperator(String),

    #[error("invalid numeric parameter `{0}`")]
    InvalidNumber(String),
}
