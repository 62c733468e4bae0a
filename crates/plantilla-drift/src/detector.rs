//! Drift detection and template compatibility checks.

use crate::error::DriftError;
use crate::similarity::field_similarity;
use crate::suggest;
use chrono::Utc;
use plantilla_domain::{
    DriftSeverity, FieldMapping, MissingField, NewField, RenamedField, SchemaDriftReport,
    TemplateDefinition,
};
use plantilla_mapping::collect_leaf_paths;
use serde_json::Value;
use tracing::{debug, info};

/// Candidates qualify as renames only at or above this similarity
const RENAME_THRESHOLD: f64 = 0.7;

/// Detects divergence between live source objects and template expectations
pub struct DriftDetector;

impl DriftDetector {
    /// Compare a source object's field set against a template.
    ///
    /// Rename matching is greedy: each missing field independently takes its
    /// best-scoring unmatched new field at or above 0.7, and one source field
    /// may serve as the candidate for several missing fields. The report is
    /// advisory; duplicates are visible to the operator.
    pub fn detect_drift(
        source: &Value,
        template: &TemplateDefinition,
    ) -> Result<SchemaDriftReport, DriftError> {
        if !source.is_object() {
            return Err(DriftError::InvalidInput(
                "source must be a composite object".to_string(),
            ));
        }

        let source_paths = collect_leaf_paths(source);
        let template_paths: Vec<&str> = template.source_paths();

        let new_fields: Vec<NewField> = source_paths
            .iter()
            .filter(|path| {
                !template_paths
                    .iter()
                    .any(|tp| tp.eq_ignore_ascii_case(path))
            })
            .map(|path| NewField { path: path.clone() })
            .collect();

        let missing_fields: Vec<MissingField> = template
            .field_mappings
            .iter()
            .filter(|mapping| {
                !source_paths
                    .iter()
                    .any(|sp| sp.eq_ignore_ascii_case(&mapping.source_field_path))
            })
            .map(|mapping| MissingField {
                path: mapping.source_field_path.clone(),
                is_required: mapping.is_required,
            })
            .collect();

        let renamed_fields = Self::match_renames(&missing_fields, &new_fields);
        let severity = Self::classify(&new_fields, &missing_fields, &renamed_fields);

        info!(
            template_id = %template.template_id,
            severity = severity.as_str(),
            new = new_fields.len(),
            missing = missing_fields.len(),
            renamed = renamed_fields.len(),
            "schema drift analyzed"
        );

        Ok(SchemaDriftReport {
            template_id: template.template_id.clone(),
            template_type: template.template_type,
            template_version: template.version.clone(),
            detected_at: Utc::now(),
            severity,
            new_fields,
            missing_fields,
            renamed_fields,
        })
    }

    /// Best fuzzy candidate per missing field, greedy per iteration
    fn match_renames(missing: &[MissingField], new: &[NewField]) -> Vec<RenamedField> {
        let mut renames = Vec::new();
        for missing_field in missing {
            let mut best: Option<(f64, &NewField)> = None;
            for candidate in new {
                let score = field_similarity(
                    last_segment(&missing_field.path),
                    last_segment(&candidate.path),
                );
                if score < RENAME_THRESHOLD {
                    continue;
                }
                if best.map_or(true, |(b, _)| score > b) {
                    best = Some((score, candidate));
                }
            }
            if let Some((score, candidate)) = best {
                debug!(
                    old = %missing_field.path,
                    suggested = %candidate.path,
                    score,
                    "rename candidate found"
                );
                renames.push(RenamedField {
                    old_path: missing_field.path.clone(),
                    suggested_path: candidate.path.clone(),
                    similarity: score,
                });
            }
        }
        renames
    }

    fn classify(
        new: &[NewField],
        missing: &[MissingField],
        renamed: &[RenamedField],
    ) -> DriftSeverity {
        let unrecoverable_required = missing.iter().any(|m| {
            m.is_required && !renamed.iter().any(|r| r.old_path == m.path)
        });
        if unrecoverable_required {
            DriftSeverity::High
        } else if !missing.is_empty() || !renamed.is_empty() {
            DriftSeverity::Medium
        } else if !new.is_empty() {
            DriftSeverity::Low
        } else {
            DriftSeverity::None
        }
    }

    /// Propose field mappings for a source shape no template covers yet.
    ///
    /// Data types are inferred from member values, `is_required` from
    /// non-nullness, and target names humanized from the last path segment.
    pub fn suggest_field_mappings(source: &Value) -> Result<Vec<FieldMapping>, DriftError> {
        if !source.is_object() {
            return Err(DriftError::InvalidInput(
                "source must be a composite object".to_string(),
            ));
        }
        Ok(suggest::suggest_mappings(source))
    }

    /// Decide whether a template remains usable against a source object.
    ///
    /// Fails only when a required field is missing with no rename candidate;
    /// a confidently recoverable rename keeps the template usable.
    pub fn validate_template_compatibility(
        source: &Value,
        template: &TemplateDefinition,
    ) -> Result<(), DriftError> {
        let report = Self::detect_drift(source, template)?;
        for missing in &report.missing_fields {
            if missing.is_required
                && !report
                    .renamed_fields
                    .iter()
                    .any(|r| r.old_path == missing.path)
            {
                return Err(DriftError::Incompatible {
                    path: missing.path.clone(),
                });
            }
        }
        Ok(())
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}
