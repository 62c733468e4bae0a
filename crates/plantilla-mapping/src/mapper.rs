//! The template field mapper.

use crate::error::MapError;
use crate::format::format_value;
use crate::path::{resolve_path, value_to_raw};
use crate::transform::{apply_pipeline, parse_pipeline};
use crate::validate::{apply_rules, parse_rule};
use plantilla_domain::{Cancellable, CancellationToken, FieldMapping, TemplateDefinition};
use serde_json::Value;
use tracing::{debug, warn};

/// Authoring-time diagnostics for a single field mapping, produced without
/// live data
#[derive(Debug, Clone, Default)]
pub struct MappingDiagnostics {
    /// Whether the source path resolved against the type prototype
    pub path_resolvable: bool,

    /// Whether the transform expression parsed
    pub transform_valid: bool,

    /// Whether every validation rule parsed
    pub rules_valid: bool,

    /// Human-readable problems, one per issue
    pub issues: Vec<String>,
}

impl MappingDiagnostics {
    /// True when the mapping has no authoring problems
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Resolves template field mappings against composite source objects.
///
/// Stateless; every method is an associated function so callers need no
/// instance.
pub struct FieldMapper;

impl FieldMapper {
    /// Resolve one output field from a source object.
    ///
    /// Pipeline: path resolution → data-type formatting → transform chain →
    /// validation rules. A missing or null source value uses the mapping's
    /// default (or empty string) when optional and fails when required; the
    /// default bypasses the rest of the pipeline.
    pub fn map_field(source: &Value, mapping: &FieldMapping) -> Result<String, MapError> {
        let resolved = resolve_path(source, &mapping.source_field_path);
        let raw = match resolved {
            None | Some(Value::Null) => {
                if mapping.is_required {
                    return Err(MapError::RequiredFieldMissing {
                        path: mapping.source_field_path.clone(),
                    });
                }
                debug!(
                    path = %mapping.source_field_path,
                    "optional path unresolved, using default"
                );
                return Ok(mapping.default_value.clone().unwrap_or_default());
            }
            Some(value) => value_to_raw(value),
        };

        let formatted = format_value(&raw, mapping.data_type, mapping.format.as_deref()).map_err(
            |reason| MapError::FormatFailed {
                field: mapping.target_field.clone(),
                data_type: mapping.data_type.as_str().to_string(),
                reason,
            },
        )?;

        let transformed = match &mapping.transform_expression {
            Some(expression) if !expression.trim().is_empty() => {
                let calls = parse_pipeline(expression, &mapping.target_field)?;
                apply_pipeline(formatted, &calls, &mapping.target_field)?
            }
            _ => formatted,
        };

        let rules = mapping
            .validation_rules
            .iter()
            .map(|r| parse_rule(r, &mapping.target_field))
            .collect::<Result<Vec<_>, _>>()?;
        apply_rules(&transformed, &rules, &mapping.target_field)?;

        Ok(transformed)
    }

    /// Map every field of a template, strictly by ascending `display_order`.
    ///
    /// A required-field failure aborts the whole operation with no partial
    /// map; an optional-field failure is logged and the field omitted. The
    /// cancellation token is checked between successive mappings.
    pub fn map_all_fields(
        source: &Value,
        template: &TemplateDefinition,
        cancel: &CancellationToken,
    ) -> Result<Vec<(String, String)>, MapError> {
        let mut output = Vec::with_capacity(template.field_mappings.len());
        for mapping in template.ordered_mappings() {
            if cancel.is_cancelled() {
                return Err(MapError::Cancelled);
            }
            match Self::map_field(source, mapping) {
                Ok(value) => output.push((mapping.target_field.clone(), value)),
                Err(err) if mapping.is_required => return Err(err),
                Err(err) => {
                    warn!(
                        field = %mapping.target_field,
                        error = %err,
                        "optional field failed, omitting"
                    );
                }
            }
        }
        Ok(output)
    }

    /// Check a mapping at authoring time against a type prototype: the path
    /// must resolve on the prototype and both mini-language expressions must
    /// parse. No live data is consulted.
    pub fn validate_mapping(mapping: &FieldMapping, prototype: &Value) -> MappingDiagnostics {
        let mut diag = MappingDiagnostics {
            path_resolvable: true,
            transform_valid: true,
            rules_valid: true,
            issues: Vec::new(),
        };

        if resolve_path(prototype, &mapping.source_field_path).is_none() {
            diag.path_resolvable = false;
            diag.issues.push(format!(
                "path '{}' does not resolve on the source type",
                mapping.source_field_path
            ));
        }

        if let Some(expression) = &mapping.transform_expression {
            if !expression.trim().is_empty() {
                if let Err(err) = parse_pipeline(expression, &mapping.target_field) {
                    diag.transform_valid = false;
                    diag.issues.push(err.to_string());
                }
            }
        }

        for rule in &mapping.validation_rules {
            if let Err(err) = parse_rule(rule, &mapping.target_field) {
                diag.rules_valid = false;
                diag.issues.push(err.to_string());
            }
        }

        diag
    }
}
