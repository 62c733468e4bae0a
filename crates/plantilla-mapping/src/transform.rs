//! The transform mini-language.
//!
//! Grammar (bit-exact): `Name(arg1, arg2)` calls joined by `|`. Parentheses
//! are optional for zero-argument calls. Names are case-insensitive.
//! Supported operations: `ToUpper`, `ToLower`, `Trim`, `Substring(start,len)`,
//! `Replace(old,new)`, `PadLeft(width[,char])`, `PadRight(width[,char])`.
//!
//! Expressions parse into ordered `(name, args)` tuples dispatched through
//! pure functions, so the set is extensible without a scripting engine.

use crate::MapError;

/// One parsed call in a transform pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformCall {
    /// Operation name, lowercased
    pub name: String,

    /// Raw argument strings, trimmed, in call order
    pub args: Vec<String>,
}

/// Parse a pipe-chained transform expression into ordered calls.
///
/// Syntax errors (unbalanced parentheses, empty call) are reported against
/// `field`; unknown names are deferred to application time so authoring
/// tools can parse expressions they cannot execute.
pub fn parse_pipeline(expression: &str, field: &str) -> Result<Vec<TransformCall>, MapError> {
    let mut calls = Vec::new();
    for raw_call in expression.split('|') {
        let raw_call = raw_call.trim();
        if raw_call.is_empty() {
            return Err(MapError::InvalidTransform {
                field: field.to_string(),
                reason: "empty call in pipeline".to_string(),
            });
        }
        calls.push(parse_call(raw_call, field)?);
    }
    Ok(calls)
}

fn parse_call(raw: &str, field: &str) -> Result<TransformCall, MapError> {
    let (name, args) = match raw.find('(') {
        None => (raw, Vec::new()),
        Some(open) => {
            if !raw.ends_with(')') {
                return Err(MapError::InvalidTransform {
                    field: field.to_string(),
                    reason: format!("unbalanced parentheses in '{}'", raw),
                });
            }
            let name = &raw[..open];
            let inner = &raw[open + 1..raw.len() - 1];
            let args = if inner.trim().is_empty() {
                Vec::new()
            } else {
                inner.split(',').map(|a| a.trim().to_string()).collect()
            };
            (name, args)
        }
    };
    let name = name.trim();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(MapError::InvalidTransform {
            field: field.to_string(),
            reason: format!("bad operation name in '{}'", raw),
        });
    }
    Ok(TransformCall {
        name: name.to_lowercase(),
        args,
    })
}

/// Apply a parsed pipeline to a value.
pub fn apply_pipeline(
    value: String,
    calls: &[TransformCall],
    field: &str,
) -> Result<String, MapError> {
    let mut current = value;
    for call in calls {
        current = apply_call(current, call, field)?;
    }
    Ok(current)
}

fn apply_call(value: String, call: &TransformCall, field: &str) -> Result<String, MapError> {
    match call.name.as_str() {
        "toupper" => Ok(value.to_uppercase()),
        "tolower" => Ok(value.to_lowercase()),
        "trim" => Ok(value.trim().to_string()),
        "substring" => {
            let (start, length) = two_usize_args(call, field)?;
            Ok(value.chars().skip(start).take(length).collect())
        }
        "replace" => {
            if call.args.len() != 2 {
                return Err(arg_error(call, field, "expects (old, new)"));
            }
            Ok(value.replace(&call.args[0], &call.args[1]))
        }
        "padleft" => {
            let (width, pad) = pad_args(call, field)?;
            Ok(pad_string(value, width, pad, true))
        }
        "padright" => {
            let (width, pad) = pad_args(call, field)?;
            Ok(pad_string(value, width, pad, false))
        }
        other => Err(MapError::UnsupportedTransform {
            field: field.to_string(),
            name: other.to_string(),
        }),
    }
}

fn arg_error(call: &TransformCall, field: &str, expected: &str) -> MapError {
    MapError::InvalidTransform {
        field: field.to_string(),
        reason: format!("{} {}", call.name, expected),
    }
}

fn two_usize_args(call: &TransformCall, field: &str) -> Result<(usize, usize), MapError> {
    if call.args.len() != 2 {
        return Err(arg_error(call, field, "expects (start, length)"));
    }
    let start = call.args[0]
        .parse()
        .map_err(|_| arg_error(call, field, "expects a numeric start"))?;
    let length = call.args[1]
        .parse()
        .map_err(|_| arg_error(call, field, "expects a numeric length"))?;
    Ok((start, length))
}

fn pad_args(call: &TransformCall, field: &str) -> Result<(usize, char), MapError> {
    if call.args.is_empty() || call.args.len() > 2 {
        return Err(arg_error(call, field, "expects (width[, char])"));
    }
    let width = call.args[0]
        .parse()
        .map_err(|_| arg_error(call, field, "expects a numeric width"))?;
    let pad = match call.args.get(1) {
        None => ' ',
        Some(s) if s.chars().count() == 1 => s.chars().next().unwrap_or(' '),
        Some(_) => return Err(arg_error(call, field, "expects a single pad character")),
    };
    Ok((width, pad))
}

fn pad_string(value: String, width: usize, pad: char, left: bool) -> String {
    let len = value.chars().count();
    if len >= width {
        return value;
    }
    let padding: String = std::iter::repeat(pad).take(width - len).collect();
    if left {
        format!("{}{}", padding, value)
    } else {
        format!("{}{}", value, padding)
    }
}
