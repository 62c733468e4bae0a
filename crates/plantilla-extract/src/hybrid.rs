//! Hybrid/complement extraction strategy.
//!
//! Best signal: explicit `Label: value` lines mixed with contextual phrases,
//! the shape of form-like documents that are neither clean grids nor pure
//! prose. Label hits and contextual pattern hits are combined.

use crate::patterns;
use crate::strategy::ExtractionStrategy;
use crate::ExtractError;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use plantilla_domain::{Cancellable, CancellationToken, ExtractedFields};
use regex::Regex;
use tracing::debug;

static LABELED_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*([A-Za-zÁÉÍÓÚÑáéíóúñ][A-Za-zÁÉÍÓÚÑáéíóúñ\s\./]{2,40})\s*:\s*(\S[^\n]*)$")
        .expect("static pattern must compile")
});

/// Extracts fields from label/value lines plus contextual patterns
#[derive(Debug, Default, Clone, Copy)]
pub struct HybridStrategy;

impl HybridStrategy {
    /// Create a new hybrid strategy
    pub fn new() -> Self {
        Self
    }

    fn labeled_lines(text: &str) -> Vec<(String, String)> {
        LABELED_LINE
            .captures_iter(text)
            .filter_map(|caps| {
                let label = caps.get(1)?.as_str().trim().to_lowercase();
                let value = caps.get(2)?.as_str().trim().to_string();
                if value.is_empty() {
                    None
                } else {
                    Some((label, value))
                }
            })
            .collect()
    }

    fn context_hits(text: &str) -> usize {
        [
            patterns::first_match(&patterns::EXPEDIENTE_PATTERNS, text),
            patterns::first_match(&patterns::CAUSA_PATTERNS, text),
            patterns::first_match(&patterns::ACCION_PATTERNS, text),
        ]
        .iter()
        .filter(|hit| hit.is_some())
        .count()
    }
}

#[async_trait]
impl ExtractionStrategy for HybridStrategy {
    fn name(&self) -> &'static str {
        "hybrid"
    }

    fn priority(&self) -> u8 {
        2
    }

    async fn can_extract(&self, text: &str) -> bool {
        !Self::labeled_lines(text).is_empty() || Self::context_hits(text) >= 1
    }

    async fn confidence(&self, text: &str) -> u8 {
        let labels = Self::labeled_lines(text).len();
        let context = Self::context_hits(text);
        match (labels, context) {
            (l, c) if l >= 3 && c >= 2 => 85,
            (l, c) if l >= 2 || c >= 2 => 75,
            (l, c) if l >= 1 || c >= 1 => 60,
            _ => 0,
        }
    }

    async fn extract(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<ExtractedFields>, ExtractError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        if cancel.is_cancelled() {
            return Err(ExtractError::Cancelled);
        }

        let mut fields = ExtractedFields::new();

        // Label pass first: explicit labels outrank contextual guesses.
        for (label, value) in Self::labeled_lines(text) {
            if label.contains("expediente") || label.contains("rol") {
                fields.expediente.get_or_insert(value);
            } else if label.contains("causa") || label.contains("materia") {
                fields.causa.get_or_insert(value);
            } else if label.contains("acci") || label.contains("solicit") {
                fields.accion_solicitada.get_or_insert(value);
            }
        }

        if cancel.is_cancelled() {
            return Err(ExtractError::Cancelled);
        }

        // Contextual pass fills what the labels did not cover.
        if fields.expediente.is_none() {
            fields.expediente = patterns::first_match(&patterns::EXPEDIENTE_PATTERNS, text);
        }
        if fields.causa.is_none() {
            fields.causa = patterns::first_match(&patterns::CAUSA_PATTERNS, text);
        }
        if fields.accion_solicitada.is_none() {
            fields.accion_solicitada = patterns::first_match(&patterns::ACCION_PATTERNS, text);
        }

        patterns::harvest_extended(text, &mut fields.additional_fields);
        patterns::harvest_montos(text, &mut fields);
        patterns::harvest_fechas(text, &mut fields);

        if fields.is_empty() {
            debug!("hybrid strategy found no usable fields");
            return Ok(None);
        }
        Ok(Some(fields))
    }
}
