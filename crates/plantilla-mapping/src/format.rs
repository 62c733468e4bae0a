//! Data-type formatting for resolved values.
//!
//! Each [`DataType`] has a default rendering; an explicit `Format` string on
//! the mapping overrides it. Formatting is deterministic: the same
//! `(value, data_type, format)` triple always yields the same string.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use plantilla_domain::DataType;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Date shapes accepted when a value is tagged `DataType::DateTime`
const DATE_INPUT_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];
const DATETIME_INPUT_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%d/%m/%Y %H:%M:%S"];

const DATETIME_DEFAULT_OUTPUT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a raw resolved string according to the mapping's data type and
/// optional explicit format. Returns the proximate cause on failure.
pub fn format_value(raw: &str, data_type: DataType, format: Option<&str>) -> Result<String, String> {
    match data_type {
        DataType::String | DataType::Other | DataType::Guid => Ok(raw.to_string()),
        DataType::Int | DataType::Long => format_integer(raw, format),
        DataType::Decimal => format_decimal(raw, format, 2),
        DataType::Double => format_decimal(raw, format, 4),
        DataType::Bool => format_bool(raw),
        DataType::DateTime => format_datetime(raw, format),
    }
}

fn format_integer(raw: &str, format: Option<&str>) -> Result<String, String> {
    let value = i64::from_str(raw.trim()).map_err(|_| format!("'{}' is not an integer", raw))?;
    match format {
        // D<n>: zero-pad to n digits
        Some(fmt) if fmt.len() > 1 && fmt.starts_with(&['D', 'd'][..]) => {
            let width: usize = fmt[1..]
                .parse()
                .map_err(|_| format!("bad integer format '{}'", fmt))?;
            Ok(format!("{:0width$}", value, width = width))
        }
        Some(fmt) if !fmt.is_empty() => Err(format!("bad integer format '{}'", fmt)),
        _ => Ok(value.to_string()),
    }
}

fn format_decimal(raw: &str, format: Option<&str>, default_dp: u32) -> Result<String, String> {
    let value =
        Decimal::from_str(raw.trim()).map_err(|_| format!("'{}' is not a decimal", raw))?;
    let dp = match format {
        // F<n> / N<n>: fixed decimal places
        Some(fmt) if fmt.len() > 1 && fmt.starts_with(&['F', 'f', 'N', 'n'][..]) => fmt[1..]
            .parse::<u32>()
            .map_err(|_| format!("bad decimal format '{}'", fmt))?,
        Some(fmt) if !fmt.is_empty() => return Err(format!("bad decimal format '{}'", fmt)),
        _ => default_dp,
    };
    Ok(format!("{:.prec$}", value.round_dp(dp), prec = dp as usize))
}

fn format_bool(raw: &str) -> Result<String, String> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "sí" | "si" | "verdadero" => Ok("true".to_string()),
        "false" | "0" | "no" | "falso" | "" => Ok("false".to_string()),
        other => Err(format!("'{}' is not a boolean", other)),
    }
}

fn format_datetime(raw: &str, format: Option<&str>) -> Result<String, String> {
    let parsed = parse_datetime(raw.trim())
        .ok_or_else(|| format!("'{}' is not a recognized date", raw))?;
    let output = format.unwrap_or(DATETIME_DEFAULT_OUTPUT);
    Ok(parsed.format(output).to_string())
}

fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for fmt in DATETIME_INPUT_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_INPUT_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(d.and_hms_opt(0, 0, 0)?);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_passthrough() {
        assert_eq!(
            format_value("  hola ", DataType::String, None).unwrap(),
            "  hola "
        );
    }

    #[test]
    fn test_integer_zero_padding() {
        assert_eq!(format_value("42", DataType::Int, Some("D6")).unwrap(), "000042");
        assert_eq!(format_value("42", DataType::Long, None).unwrap(), "42");
        assert!(format_value("x", DataType::Int, None).is_err());
    }

    #[test]
    fn test_decimal_default_two_places() {
        assert_eq!(format_value("1234.5", DataType::Decimal, None).unwrap(), "1234.50");
        assert_eq!(
            format_value("1234.5678", DataType::Decimal, Some("F1")).unwrap(),
            "1234.6"
        );
    }

    #[test]
    fn test_datetime_default_and_override() {
        assert_eq!(
            format_value("12/03/2024", DataType::DateTime, None).unwrap(),
            "2024-03-12 00:00:00"
        );
        assert_eq!(
            format_value("2024-03-12", DataType::DateTime, Some("%d-%m-%Y")).unwrap(),
            "12-03-2024"
        );
    }

    #[test]
    fn test_formatting_is_deterministic() {
        let a = format_value("99.999", DataType::Decimal, Some("F2")).unwrap();
        let b = format_value("99.999", DataType::Decimal, Some("F2")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_bool_localized_forms() {
        assert_eq!(format_value("sí", DataType::Bool, None).unwrap(), "true");
        assert_eq!(format_value("no", DataType::Bool, None).unwrap(), "false");
    }
}
