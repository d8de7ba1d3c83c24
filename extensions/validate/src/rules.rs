use std::collections::HashMap;
use std::str::FromStr;

use crate::ValidateError;

/// One validation criterion applied to a single field.
pub trait ValidationRule: std::fmt::Debug + Send + Sync {
    /// Snake-case identifier used for error keys and message overrides.
    fn name(&self) -> &'static str;

    /// Whether `field` within `data` satisfies this rule.
    fn is_valid(&self, field: &str, data: &HashMap<String, String>) -> bool;

    /// Human-readable failure message for `field`.
    fn message(&self, field: &str) -> String;
}

fn present(data: &HashMap<String, String>, field: &str) -> bool {
    data.get(field).is_some_and(|value| !value.is_empty())
}

fn numeric(value: &str) -> bool {
    value.parse::<f64>().is_ok()
}

/// The field must be present and non-empty.
#[derive(Debug)]
pub struct Required;

impl ValidationRule for Required {
    fn name(&self) -> &'static str {
        "required"
    }

    fn is_valid(&self, field: &str, data: &HashMap<String, String>) -> bool {
        present(data, field)
    }

    fn message(&self, field: &str) -> String {
        format!("The field {field} is required.")
    }
}

/// The field is required whenever `with_field` is present and non-empty.
#[derive(Debug)]
pub struct RequiredWith {
    with_field: String,
}

impl RequiredWith {
    pub fn new(with_field: impl Into<String>) -> Self {
        Self {
            with_field: with_field.into(),
        }
    }
}

impl ValidationRule for RequiredWith {
    fn name(&self) -> &'static str {
        "required_with"
    }

    fn is_valid(&self, field: &str, data: &HashMap<String, String>) -> bool {
        if present(data, &self.with_field) {
            present(data, field)
        } else {
            true
        }
    }

    fn message(&self, field: &str) -> String {
        format!(
            "The field {field} is required when {} exist.",
            self.with_field
        )
    }
}

/// Comparison operator for [`RequiredWhen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Gt,
    Lt,
    Ge,
    Le,
}

impl Operator {
    fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Ge => ">=",
            Operator::Le => "<=",
        }
    }
}

impl FromStr for Operator {
    type Err = ValidateError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "=" => Ok(Operator::Eq),
            ">" => Ok(Operator::Gt),
            "<" => Ok(Operator::Lt),
            ">=" => Ok(Operator::Ge),
            "<=" => Ok(Operator::Le),
            other => Err(ValidateError::UnknownOperator(other.to_string())),
        }
    }
}

/// The field is required whenever `other_field` compares true against
/// `compare_with`. Equality compares the raw strings; the ordered
/// operators compare numerically, with unparsable values treated as zero.
#[derive(Debug)]
pub struct RequiredWhen {
    other_field: String,
    operator: Operator,
    compare_with: String,
}

impl RequiredWhen {
    pub fn new(
        other_field: impl Into<String>,
        operator: Operator,
        compare_with: impl Into<String>,
    ) -> Self {
        Self {
            other_field: other_field.into(),
            operator,
            compare_with: compare_with.into(),
        }
    }
}

impl ValidationRule for RequiredWhen {
    fn name(&self) -> &'static str {
        "required_when"
    }

    fn is_valid(&self, field: &str, data: &HashMap<String, String>) -> bool {
        let Some(other) = data.get(&self.other_field) else {
            return false;
        };

        let as_number = |value: &str| value.parse::<f64>().unwrap_or(0.0);
        let threshold = as_number(&self.compare_with);
        let is_required = match self.operator {
            Operator::Eq => other == &self.compare_with,
            Operator::Gt => as_number(other) > threshold,
            Operator::Lt => as_number(other) < threshold,
            Operator::Ge => as_number(other) >= threshold,
            Operator::Le => as_number(other) <= threshold,
        };

        !is_required || present(data, field)
    }

    fn message(&self, field: &str) -> String {
        format!(
            "The field {field} is required when {} {} {}",
            self.other_field,
            self.operator.symbol(),
            self.compare_with
        )
    }
}

/// The field must parse as a number.
#[derive(Debug)]
pub struct Number;

impl ValidationRule for Number {
    fn name(&self) -> &'static str {
        "number"
    }

    fn is_valid(&self, field: &str, data: &HashMap<String, String>) -> bool {
        data.get(field).is_some_and(|value| numeric(value))
    }

    fn message(&self, field: &str) -> String {
        format!("The field {field} must be a valid numeric value.")
    }
}

/// The field must be numeric and strictly below `limit`.
#[derive(Debug)]
pub struct LessThan {
    limit: f64,
}

impl LessThan {
    pub fn new(limit: f64) -> Self {
        Self { limit }
    }
}

impl ValidationRule for LessThan {
    fn name(&self) -> &'static str {
        "less_than"
    }

    fn is_valid(&self, field: &str, data: &HashMap<String, String>) -> bool {
        data.get(field)
            .and_then(|value| value.parse::<f64>().ok())
            .is_some_and(|value| value < self.limit)
    }

    fn message(&self, field: &str) -> String {
        format!(
            "The field {field} must be a numeric value less than {}.",
            self.limit
        )
    }
}

/// Loose structural email check: a single `@`, a domain with a single dot,
/// and non-empty username, label and top-level domain.
#[derive(Debug)]
pub struct Email;

impl ValidationRule for Email {
    fn name(&self) -> &'static str {
        "email"
    }

    fn is_valid(&self, field: &str, data: &HashMap<String, String>) -> bool {
        let Some(raw) = data.get(field) else {
            return false;
        };
        let email = raw.trim().to_lowercase();

        let mut at_parts = email.split('@');
        let (Some(username), Some(domain), None) =
            (at_parts.next(), at_parts.next(), at_parts.next())
        else {
            return false;
        };

        let mut dot_parts = domain.split('.');
        let (Some(label), Some(tld), None) =
            (dot_parts.next(), dot_parts.next(), dot_parts.next())
        else {
            return false;
        };

        !username.is_empty() && !label.is_empty() && !tld.is_empty()
    }

    fn message(&self, field: &str) -> String {
        format!("The field {field} must be a valid email address.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_required_rejects_missing_and_empty_values() {
        let rule = Required;
        assert!(rule.is_valid("name", &data(&[("name", "ada")])));
        assert!(!rule.is_valid("name", &data(&[("name", "")])));
        assert!(!rule.is_valid("name", &data(&[])));
    }

    #[test]
    fn test_required_with_only_applies_when_companion_present() {
        let rule = RequiredWith::new("password");
        assert!(rule.is_valid("confirm", &data(&[])));
        assert!(rule.is_valid("confirm", &data(&[("password", "")])));
        assert!(!rule.is_valid("confirm", &data(&[("password", "secret")])));
        assert!(rule.is_valid(
            "confirm",
            &data(&[("password", "secret"), ("confirm", "secret")])
        ));
    }

    #[test]
    fn test_required_when_compares_numerically() {
        let rule = RequiredWhen::new("age", Operator::Ge, "18");
        // Other field missing at all: invalid.
        assert!(!rule.is_valid("guardian", &data(&[])));
        // Condition not met: not required.
        assert!(rule.is_valid("guardian", &data(&[("age", "17")])));
        // Condition met and field missing: invalid.
        assert!(!rule.is_valid("guardian", &data(&[("age", "18")])));
        assert!(rule.is_valid(
            "guardian",
            &data(&[("age", "18"), ("guardian", "present")])
        ));
    }

    #[test]
    fn test_required_when_equality_compares_strings() {
        let rule = RequiredWhen::new("plan", Operator::Eq, "custom");
        assert!(rule.is_valid("details", &data(&[("plan", "basic")])));
        assert!(!rule.is_valid("details", &data(&[("plan", "custom")])));
    }

    #[test]
    fn test_number_accepts_integers_and_floats() {
        let rule = Number;
        assert!(rule.is_valid("n", &data(&[("n", "42")])));
        assert!(rule.is_valid("n", &data(&[("n", "-3.5")])));
        assert!(!rule.is_valid("n", &data(&[("n", "forty-two")])));
        assert!(!rule.is_valid("n", &data(&[])));
    }

    #[test]
    fn test_less_than_is_strict() {
        let rule = LessThan::new(10.0);
        assert!(rule.is_valid("n", &data(&[("n", "9.9")])));
        assert!(!rule.is_valid("n", &data(&[("n", "10")])));
        assert!(!rule.is_valid("n", &data(&[("n", "nope")])));
    }

    #[test]
    fn test_email_structure_checks() {
        let rule = Email;
        assert!(rule.is_valid("mail", &data(&[("mail", "ada@example.com")])));
        assert!(rule.is_valid("mail", &data(&[("mail", "  ADA@Example.COM ")])));
        assert!(!rule.is_valid("mail", &data(&[("mail", "ada@example")])));
        assert!(!rule.is_valid("mail", &data(&[("mail", "ada@sub.example.com")])));
        assert!(!rule.is_valid("mail", &data(&[("mail", "ada@@example.com")])));
        assert!(!rule.is_valid("mail", &data(&[("mail", "@example.com")])));
        assert!(!rule.is_valid("mail", &data(&[])));
    }
}
