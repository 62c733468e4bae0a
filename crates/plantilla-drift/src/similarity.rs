//! Fuzzy field-name similarity.
//!
//! Both names are normalized (lowercased, conventional accessor prefixes and
//! noise suffixes stripped); containment is rewarded independent of edit
//! distance, everything else falls back to normalized Levenshtein.

use strsim::levenshtein;

const PREFIXES: &[&str] = &["get", "set", "is", "has", "the"];
const SUFFIXES: &[&str] = &["field", "property", "value"];

/// Normalize a field name for comparison
fn normalize(name: &str) -> String {
    let mut name = name.to_lowercase();
    for prefix in PREFIXES {
        if name.len() > prefix.len() {
            if let Some(rest) = name.strip_prefix(prefix) {
                name = rest.to_string();
                break;
            }
        }
    }
    for suffix in SUFFIXES {
        if name.len() > suffix.len() {
            if let Some(rest) = name.strip_suffix(suffix) {
                name = rest.to_string();
                break;
            }
        }
    }
    name
}

/// Similarity between two field names in [0, 1].
///
/// Symmetric. Containment of one normalized name in the other scores at
/// least 0.7 (`max(0.7, shorter/longer)`); otherwise
/// `1 - levenshtein / max(len)`.
pub fn field_similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let (shorter, longer) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    if longer.contains(shorter.as_str()) {
        return (shorter.len() as f64 / longer.len() as f64).max(0.7);
    }

    let distance = levenshtein(&a, &b) as f64;
    let max_len = a.len().max(b.len()) as f64;
    1.0 - distance / max_len
}
