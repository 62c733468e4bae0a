//! Dotted-path resolution over composite source objects.
//!
//! The engine mandates no particular introspection machinery; source objects
//! arrive as `serde_json::Value` composites and paths are resolved segment by
//! segment with case-insensitive member lookup. Arrays are opaque leaves:
//! a path never indexes into a collection.

use serde_json::Value;

/// Resolve a dotted path against a source object.
///
/// Member lookup is case-insensitive per segment; an exact-case match wins
/// over a case-folded one. Returns `None` when any segment is absent or the
/// walk hits a non-object before the path is exhausted.
pub fn resolve_path<'a>(source: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = source;
    for segment in path.split('.') {
        if segment.is_empty() {
            return None;
        }
        let map = current.as_object()?;
        current = map.get(segment).or_else(|| {
            map.iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(segment))
                .map(|(_, value)| value)
        })?;
    }
    Some(current)
}

/// Depth-first collection of dotted leaf paths.
///
/// Walks composite members only; scalars and nulls are leaves, arrays are
/// treated as opaque leaves (collection internals are not field paths).
pub fn collect_leaf_paths(source: &Value) -> Vec<String> {
    let mut paths = Vec::new();
    walk(source, String::new(), &mut paths);
    paths
}

fn walk(value: &Value, prefix: String, paths: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                walk(child, path, paths);
            }
        }
        _ => {
            if !prefix.is_empty() {
                paths.push(prefix);
            }
        }
    }
}

/// Render a resolved scalar as the raw string the formatting stage consumes.
/// Nulls render empty; composites are serialized compactly.
pub fn value_to_raw(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_is_case_insensitive() {
        let source = json!({ "Deudor": { "NombreCompleto": "Juan Soto" } });
        let value = resolve_path(&source, "deudor.nombrecompleto").unwrap();
        assert_eq!(value, "Juan Soto");
    }

    #[test]
    fn test_exact_case_wins_over_folded() {
        let source = json!({ "id": 1, "ID": 2 });
        assert_eq!(resolve_path(&source, "ID").unwrap(), &json!(2));
    }

    #[test]
    fn test_missing_segment_resolves_none() {
        let source = json!({ "a": { "b": 1 } });
        assert!(resolve_path(&source, "a.c").is_none());
        assert!(resolve_path(&source, "a.b.c").is_none());
    }

    #[test]
    fn test_collect_leaf_paths_depth_first() {
        let source = json!({
            "ExpedienteId": "C-1",
            "Deudor": { "Nombre": "Juan", "Rut": "1-9" },
            "Montos": [1, 2, 3]
        });
        let paths = collect_leaf_paths(&source);
        assert!(paths.contains(&"ExpedienteId".to_string()));
        assert!(paths.contains(&"Deudor.Nombre".to_string()));
        assert!(paths.contains(&"Deudor.Rut".to_string()));
        // Arrays are opaque leaves.
        assert!(paths.contains(&"Montos".to_string()));
        assert!(!paths.iter().any(|p| p.starts_with("Montos.")));
    }

    #[test]
    fn test_null_renders_empty() {
        assert_eq!(value_to_raw(&Value::Null), "");
    }
}
