use crate::ValidateError;
use crate::rules::{
    Email, LessThan, Number, Operator, Required, RequiredWhen, RequiredWith, ValidationRule,
};

/// Parse a compact rule spec into a rule instance.
///
/// A spec is a rule name, optionally followed by `:` and comma-separated
/// parameters: `"required"`, `"less_than:10"`, `"required_when:age,>=,18"`.
pub fn parse_rule(spec: &str) -> Result<Box<dyn ValidationRule>, ValidateError> {
    if spec.is_empty() {
        return Err(ValidateError::EmptyRule);
    }

    let (name, raw_params) = match spec.split_once(':') {
        Some((name, params)) => (name, Some(params)),
        None => (spec, None),
    };

    match name {
        "required" => {
            expect_params(name, raw_params, 0)?;
            Ok(Box::new(Required))
        }
        "number" => {
            expect_params(name, raw_params, 0)?;
            Ok(Box::new(Number))
        }
        "email" => {
            expect_params(name, raw_params, 0)?;
            Ok(Box::new(Email))
        }
        "less_than" => {
            let params = expect_params(name, raw_params, 1)?;
            let limit = params[0]
                .parse::<f64>()
                .map_err(|_| ValidateError::InvalidNumber(params[0].to_string()))?;
            Ok(Box::new(LessThan::new(limit)))
        }
        "required_with" => {
            let params = expect_params(name, raw_params, 1)?;
            Ok(Box::new(RequiredWith::new(params[0])))
        }
        "required_when" => {
            let params = expect_params(name, raw_params, 3)?;
            let operator: Operator = params[1].parse()?;
            Ok(Box::new(RequiredWhen::new(params[0], operator, params[2])))
        }
        unknown => Err(ValidateError::UnknownRule(unknown.to_string())),
    }
}

/// Parse a list of specs into a ruleset for one field.
pub fn parse_rules(specs: &[&str]) -> Result<Vec<Box<dyn ValidationRule>>, ValidateError> {
    specs.iter().map(|spec| parse_rule(spec)).collect()
}

fn expect_params<'a>(
    rule: &str,
    raw: Option<&'a str>,
    expected: usize,
) -> Result<Vec<&'a str>, ValidateError> {
    let given: Vec<&str> = raw
        .map(|params| params.split(',').filter(|p| !p.is_empty()).collect())
        .unwrap_or_default();
    if given.len() != expected {
        return Err(ValidateError::WrongParameterCount {
            rule: rule.to_string(),
            expected,
            given: given.len(),
        });
    }
    Ok(given)
}
