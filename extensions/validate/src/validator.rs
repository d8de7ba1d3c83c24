use std::collections::HashMap;

use crate::rules::ValidationRule;

/// Custom message overrides: field → rule name → message.
pub type Messages = HashMap<String, HashMap<String, String>>;

/// Validation failure: for every failed field, the failing rules and their
/// messages.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("validation failed for {} field(s)", .errors.len())]
pub struct ValidationError {
    pub errors: HashMap<String, HashMap<String, String>>,
}

/// Checks input data against per-field rulesets.
///
/// On success the validated subset of the data is returned — only fields a
/// ruleset was declared for make it through.
pub struct Validator {
    data: HashMap<String, String>,
}

impl Validator {
    pub fn new(data: HashMap<String, String>) -> Self {
        Self { data }
    }

    pub fn validate(
        &self,
        ruleset: &[(&str, Vec<Box<dyn ValidationRule>>)],
    ) -> Result<HashMap<String, String>, ValidationError> {
        self.validate_with_messages(ruleset, &Messages::new())
    }

    /// Validate with per-field, per-rule message overrides.
    pub fn validate_with_messages(
        &self,
        ruleset: &[(&str, Vec<Box<dyn ValidationRule>>)],
        messages: &Messages,
    ) -> Result<HashMap<String, String>, ValidationError> {
        let mut validated = HashMap::new();
        let mut errors: HashMap<String, HashMap<String, String>> = HashMap::new();

        for (field, rules) in ruleset {
            let mut field_errors = HashMap::new();

            for rule in rules {
                if !rule.is_valid(field, &self.data) {
                    let message = messages
                        .get(*field)
                        .and_then(|overrides| overrides.get(rule.name()))
                        .cloned()
                        .unwrap_or_else(|| rule.message(field));
                    field_errors.insert(rule.name().to_string(), message);
                }
            }

            if field_errors.is_empty() {
                if let Some(value) = self.data.get(*field) {
                    validated.insert(field.to_string(), value.clone());
                }
            } else {
                errors.insert(field.to_string(), field_errors);
            }
        }

        if errors.is_empty() {
            Ok(validated)
        } else {
            Err(ValidationError { errors })
        }
    }
}
