//! Schema drift reporting types

use crate::template::TemplateType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ordinal classification of how disruptive detected drift is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DriftSeverity {
    /// Source and template agree
    None,

    /// Only new source fields; template still maps cleanly
    Low,

    /// Fields missing or renamed, but every required field is recoverable
    Medium,

    /// A required field is missing with no rename candidate
    High,
}

impl DriftSeverity {
    /// Get the severity name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DriftSeverity::None => "none",
            DriftSeverity::Low => "low",
            DriftSeverity::Medium => "medium",
            DriftSeverity::High => "high",
        }
    }
}

/// A field present on the source object but unknown to the template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewField {
    /// Dotted path on the source object
    pub path: String,
}

/// A field the template maps but the source object no longer exposes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingField {
    /// Dotted path the template expects
    pub path: String,

    /// Whether the owning mapping marks the field required
    pub is_required: bool,
}

/// A probable rename: a missing template field paired with the closest
/// unmatched new source field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenamedField {
    /// Path the template expects
    pub old_path: String,

    /// Suggested replacement path found on the source
    pub suggested_path: String,

    /// Similarity score in [0, 1]; candidates qualify at >= 0.7
    pub similarity: f64,
}

/// Result of comparing a live source object against a template.
///
/// Transient: produced per request, never persisted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDriftReport {
    /// Identity of the template compared against
    pub template_id: String,

    /// Type of the template compared against
    pub template_type: TemplateType,

    /// Version of the template compared against
    pub template_version: String,

    /// When the comparison ran
    pub detected_at: DateTime<Utc>,

    /// Overall classification
    pub severity: DriftSeverity,

    /// Source fields the template does not map
    pub new_fields: Vec<NewField>,

    /// Template fields the source does not expose
    pub missing_fields: Vec<MissingField>,

    /// Probable renames among the missing fields
    pub renamed_fields: Vec<RenamedField>,
}

impl SchemaDriftReport {
    /// True when no drift of any kind was detected
    pub fn is_clean(&self) -> bool {
        self.severity == DriftSeverity::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(DriftSeverity::None < DriftSeverity::Low);
        assert!(DriftSeverity::Low < DriftSeverity::Medium);
        assert!(DriftSeverity::Medium < DriftSeverity::High);
    }
}
