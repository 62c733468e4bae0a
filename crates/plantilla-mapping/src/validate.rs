//! The validation mini-language.
//!
//! Rule strings: `Regex:<pattern>`, `Range:<min>,<max>`, `MinLength:<n>`,
//! `MaxLength:<n>`, `EmailAddress`, `Required`. Keywords are
//! case-insensitive. Rules run in declaration order and short-circuit on the
//! first violation.

use crate::MapError;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static pattern must compile")
});

/// One parsed validation rule
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationRule {
    /// Value must match the pattern
    Regex(String),
    /// Numeric value must fall in [min, max]
    Range(f64, f64),
    /// Minimum character count
    MinLength(usize),
    /// Maximum character count
    MaxLength(usize),
    /// Value must look like an email address
    EmailAddress,
    /// Value must be non-empty after trimming
    Required,
}

/// Parse one rule string. The keyword before the first `:` is
/// case-insensitive; malformed arguments are reported against `field`.
pub fn parse_rule(rule: &str, field: &str) -> Result<ValidationRule, MapError> {
    let (keyword, rest) = match rule.find(':') {
        Some(idx) => (&rule[..idx], Some(&rule[idx + 1..])),
        None => (rule, None),
    };
    let bad = |reason: String| MapError::ValidationFailed {
        field: field.to_string(),
        reason,
    };

    match keyword.trim().to_lowercase().as_str() {
        "regex" => {
            let pattern = rest.ok_or_else(|| bad("Regex rule missing pattern".to_string()))?;
            Regex::new(pattern).map_err(|_| bad(format!("invalid pattern '{}'", pattern)))?;
            Ok(ValidationRule::Regex(pattern.to_string()))
        }
        "range" => {
            let rest = rest.ok_or_else(|| bad("Range rule missing bounds".to_string()))?;
            let parts: Vec<&str> = rest.split(',').map(str::trim).collect();
            if parts.len() != 2 {
                return Err(bad(format!("Range expects min,max: '{}'", rest)));
            }
            let min = parts[0]
                .parse()
                .map_err(|_| bad(format!("bad Range minimum '{}'", parts[0])))?;
            let max = parts[1]
                .parse()
                .map_err(|_| bad(format!("bad Range maximum '{}'", parts[1])))?;
            Ok(ValidationRule::Range(min, max))
        }
        "minlength" => {
            let rest = rest.ok_or_else(|| bad("MinLength missing value".to_string()))?;
            let n = rest
                .trim()
                .parse()
                .map_err(|_| bad(format!("bad MinLength '{}'", rest)))?;
            Ok(ValidationRule::MinLength(n))
        }
        "maxlength" => {
            let rest = rest.ok_or_else(|| bad("MaxLength missing value".to_string()))?;
            let n = rest
                .trim()
                .parse()
                .map_err(|_| bad(format!("bad MaxLength '{}'", rest)))?;
            Ok(ValidationRule::MaxLength(n))
        }
        "emailaddress" => Ok(ValidationRule::EmailAddress),
        "required" => Ok(ValidationRule::Required),
        other => Err(bad(format!("unknown validation rule '{}'", other))),
    }
}

/// Apply parsed rules in order; the first violation wins.
pub fn apply_rules(value: &str, rules: &[ValidationRule], field: &str) -> Result<(), MapError> {
    for rule in rules {
        check(value, rule).map_err(|reason| MapError::ValidationFailed {
            field: field.to_string(),
            reason,
        })?;
    }
    Ok(())
}

fn check(value: &str, rule: &ValidationRule) -> Result<(), String> {
    match rule {
        ValidationRule::Regex(pattern) => {
            // Pattern was vetted at parse time; recompilation cannot fail.
            let re = Regex::new(pattern).map_err(|_| format!("invalid pattern '{}'", pattern))?;
            if re.is_match(value) {
                Ok(())
            } else {
                Err(format!("value does not match pattern '{}'", pattern))
            }
        }
        ValidationRule::Range(min, max) => {
            let number: f64 = value
                .trim()
                .parse()
                .map_err(|_| format!("'{}' is not numeric for Range check", value))?;
            if number < *min || number > *max {
                Err(format!("{} outside range [{}, {}]", number, min, max))
            } else {
                Ok(())
            }
        }
        ValidationRule::MinLength(n) => {
            if value.chars().count() < *n {
                Err(format!("shorter than MinLength {}", n))
            } else {
                Ok(())
            }
        }
        ValidationRule::MaxLength(n) => {
            if value.chars().count() > *n {
                Err(format!("longer than MaxLength {}", n))
            } else {
                Ok(())
            }
        }
        ValidationRule::EmailAddress => {
            if EMAIL.is_match(value) {
                Ok(())
            } else {
                Err("not a valid email address".to_string())
            }
        }
        ValidationRule::Required => {
            if value.trim().is_empty() {
                Err("value is required".to_string())
            } else {
                Ok(())
            }
        }
    }
}
