//! Mapping suggestions for unfamiliar source shapes.

use plantilla_domain::{DataType, FieldMapping};
use plantilla_mapping::collect_leaf_paths;
use plantilla_mapping::resolve_path;
use serde_json::Value;

/// Infer a mapping data type from a member value.
///
/// Numbers split into Int/Double by integrality; strings are probed for the
/// date and GUID shapes the formatter understands, otherwise stay String.
pub fn infer_data_type(value: &Value) -> DataType {
    match value {
        Value::Bool(_) => DataType::Bool,
        Value::Number(n) if n.is_i64() || n.is_u64() => DataType::Int,
        Value::Number(_) => DataType::Double,
        Value::String(s) => infer_string_type(s),
        _ => DataType::Other,
    }
}

fn infer_string_type(s: &str) -> DataType {
    let s = s.trim();
    if looks_like_guid(s) {
        return DataType::Guid;
    }
    if looks_like_date(s) {
        return DataType::DateTime;
    }
    DataType::String
}

fn looks_like_guid(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 36 {
        return false;
    }
    s.char_indices().all(|(i, c)| match i {
        8 | 13 | 18 | 23 => c == '-',
        _ => c.is_ascii_hexdigit(),
    })
}

fn looks_like_date(s: &str) -> bool {
    use chrono::{NaiveDate, NaiveDateTime};
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
        || NaiveDate::parse_from_str(s, "%d/%m/%Y").is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").is_ok()
}

/// Humanize the last path segment into a target field name: separators
/// inserted before capitalized letters, underscores become spaces, words
/// capitalized.
pub fn humanize_field_name(path: &str) -> String {
    let segment = path.rsplit('.').next().unwrap_or(path);
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for c in segment.chars() {
        if c == '_' || c == '-' {
            if !current.is_empty() {
                words.push(current.clone());
                current.clear();
            }
        } else if c.is_uppercase() && !current.is_empty()
            && current.chars().last().is_some_and(|p| p.is_lowercase())
        {
            words.push(current.clone());
            current.clear();
            current.push(c);
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build suggested mappings for every leaf path of a source object
pub fn suggest_mappings(source: &Value) -> Vec<FieldMapping> {
    collect_leaf_paths(source)
        .into_iter()
        .enumerate()
        .map(|(index, path)| {
            let value = resolve_path(source, &path);
            let is_null = matches!(value, None | Some(Value::Null));
            let mut mapping = FieldMapping::new(
                path.clone(),
                humanize_field_name(&path),
            );
            mapping.data_type = value.map(infer_data_type).unwrap_or(DataType::Other);
            mapping.is_required = !is_null;
            mapping.display_order = (index + 1) as i32;
            mapping.metadata.insert(
                "suggestion_id".to_string(),
                uuid::Uuid::new_v4().to_string(),
            );
            mapping.metadata.insert(
                "suggested_from".to_string(),
                "schema-walk".to_string(),
            );
            mapping
        })
        .collect()
}
