//! Template definitions and field mappings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Output shape category a template renders into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateType {
    /// Tabular grid (header row plus one record)
    Tabular,

    /// Hierarchical markup (element per field)
    Markup,

    /// Flow document (labeled paragraphs)
    Document,
}

impl TemplateType {
    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateType::Tabular => "tabular",
            TemplateType::Markup => "markup",
            TemplateType::Document => "document",
        }
    }

    /// Parse a template type from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tabular" => Some(TemplateType::Tabular),
            "markup" => Some(TemplateType::Markup),
            "document" => Some(TemplateType::Document),
            _ => None,
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TemplateType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid template type: {}", s))
    }
}

/// Semantic tag describing how a mapped value should be interpreted
/// and formatted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Free text (no interpretation)
    String,
    /// 32-bit integer
    Int,
    /// 64-bit integer
    Long,
    /// Fixed-point decimal (amounts)
    Decimal,
    /// Floating point
    Double,
    /// Boolean
    Bool,
    /// Date or timestamp
    DateTime,
    /// Globally unique identifier
    Guid,
    /// Anything else; treated as text
    Other,
}

impl DataType {
    /// Get the data type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Int => "int",
            DataType::Long => "long",
            DataType::Decimal => "decimal",
            DataType::Double => "double",
            DataType::Bool => "bool",
            DataType::DateTime => "datetime",
            DataType::Guid => "guid",
            DataType::Other => "other",
        }
    }

    /// Parse a data type from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "string" => Some(DataType::String),
            "int" => Some(DataType::Int),
            "long" => Some(DataType::Long),
            "decimal" => Some(DataType::Decimal),
            "double" => Some(DataType::Double),
            "bool" => Some(DataType::Bool),
            "datetime" => Some(DataType::DateTime),
            "guid" => Some(DataType::Guid),
            "other" => Some(DataType::Other),
            _ => None,
        }
    }
}

impl std::str::FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid data type: {}", s))
    }
}

/// One row of a template: how a single output field derives from a
/// source field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Dotted path into the source object (case-insensitive lookup)
    pub source_field_path: String,

    /// Name of the output field
    pub target_field: String,

    /// Whether an unresolvable source path fails the whole mapping run
    pub is_required: bool,

    /// Semantic tag for value interpretation and default formatting
    pub data_type: DataType,

    /// Explicit format string, overriding the data type default
    pub format: Option<String>,

    /// Value used when an optional path does not resolve
    pub default_value: Option<String>,

    /// Pipe-chained transform calls, e.g. `Trim()|ToUpper()`
    pub transform_expression: Option<String>,

    /// Validation rule strings, applied in order, first violation wins
    pub validation_rules: Vec<String>,

    /// Position of the field in the rendered output (ascending)
    pub display_order: i32,

    /// Free-form authoring metadata
    pub metadata: HashMap<String, String>,
}

impl FieldMapping {
    /// Create a minimal mapping: optional string field, no formatting,
    /// transforms, or validation.
    pub fn new(source_field_path: impl Into<String>, target_field: impl Into<String>) -> Self {
        Self {
            source_field_path: source_field_path.into(),
            target_field: target_field.into(),
            is_required: false,
            data_type: DataType::String,
            format: None,
            default_value: None,
            transform_expression: None,
            validation_rules: Vec::new(),
            display_order: 0,
            metadata: HashMap::new(),
        }
    }

    /// Mark the mapping as required
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Set the data type
    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    /// Set the display order
    pub fn with_display_order(mut self, order: i32) -> Self {
        self.display_order = order;
        self
    }

    /// Set the default value for optional misses
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default_value = Some(default.into());
        self
    }
}

/// A versioned, typed definition of an export's field set.
///
/// Invariants enforced by the store contract:
/// - at most one template per [`TemplateType`] is active at any instant
/// - `(template_type, version)` pairs are unique
/// - save is insert-only; activation and deletion are separate operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDefinition {
    /// Opaque identity, caller-supplied
    pub template_id: String,

    /// Output shape category
    pub template_type: TemplateType,

    /// Ordered version string (e.g. "1.0", "1.1", "2.0")
    pub version: String,

    /// Human-readable template name
    pub name: String,

    /// Optional description for authors
    pub description: Option<String>,

    /// Field mappings; rendered in ascending `display_order`
    pub field_mappings: Vec<FieldMapping>,

    /// Whether this version is the active one for its type
    pub is_active: bool,

    /// Start of the validity window (inclusive)
    pub effective_date: DateTime<Utc>,

    /// End of the validity window (exclusive); open-ended when absent
    pub expiration_date: Option<DateTime<Utc>>,

    /// Audit: creation timestamp
    pub created_at: DateTime<Utc>,

    /// Audit: author identity
    pub created_by: String,
}

impl TemplateDefinition {
    /// True when `at` falls inside the template's half-open validity window
    pub fn is_effective_at(&self, at: DateTime<Utc>) -> bool {
        if at < self.effective_date {
            return false;
        }
        match self.expiration_date {
            Some(expiry) => at < expiry,
            None => true,
        }
    }

    /// Field mappings sorted by ascending display order.
    ///
    /// Declaration order in `field_mappings` is never authoritative.
    pub fn ordered_mappings(&self) -> Vec<&FieldMapping> {
        let mut mappings: Vec<&FieldMapping> = self.field_mappings.iter().collect();
        mappings.sort_by_key(|m| m.display_order);
        mappings
    }

    /// Source paths referenced by this template, in mapping order
    pub fn source_paths(&self) -> Vec<&str> {
        self.field_mappings
            .iter()
            .map(|m| m.source_field_path.as_str())
            .collect()
    }
}
