//! Table-based extraction strategy.
//!
//! Best signal: a pipe-delimited grid with a header row and a separator row,
//! the shape produced when upstream recognition preserves tabular layout.

use crate::patterns;
use crate::strategy::ExtractionStrategy;
use crate::ExtractError;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use plantilla_domain::{Cancellable, CancellationToken, ExtractedFields};
use regex::Regex;
use tracing::debug;

static SEPARATOR_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\|?[\s:|\-]*\-[\s:|\-]*\|?\s*$").expect("static pattern must compile"));

/// Extracts fields from pipe-delimited grids
#[derive(Debug, Default, Clone, Copy)]
pub struct TableStrategy;

impl TableStrategy {
    /// Create a new table strategy
    pub fn new() -> Self {
        Self
    }

    /// Lines containing at least two pipe characters (candidate grid rows)
    fn pipe_rows(text: &str) -> Vec<&str> {
        text.lines()
            .filter(|line| line.matches('|').count() >= 2)
            .collect()
    }

    fn has_separator_row(text: &str) -> bool {
        text.lines().any(|line| {
            line.contains('-') && line.matches('|').count() >= 1 && SEPARATOR_ROW.is_match(line)
        })
    }

    fn split_cells(row: &str) -> Vec<String> {
        row.trim()
            .trim_matches('|')
            .split('|')
            .map(|cell| cell.trim().to_string())
            .collect()
    }

    /// Map a header cell to one of the core trio, by keyword
    fn core_slot(header: &str) -> Option<usize> {
        let h = header.to_lowercase();
        if h.contains("expediente") || h.contains("rol") || h.contains("exp.") {
            Some(0)
        } else if h.contains("causa") || h.contains("materia") {
            Some(1)
        } else if h.contains("acci") || h.contains("solicit") {
            Some(2)
        } else {
            None
        }
    }

    /// Canonical additional-field key from a header cell
    fn slug(header: &str) -> String {
        header
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect::<String>()
            .split('_')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("_")
    }
}

#[async_trait]
impl ExtractionStrategy for TableStrategy {
    fn name(&self) -> &'static str {
        "table"
    }

    fn priority(&self) -> u8 {
        1
    }

    async fn can_extract(&self, text: &str) -> bool {
        Self::pipe_rows(text).len() >= 3
    }

    async fn confidence(&self, text: &str) -> u8 {
        let rows = Self::pipe_rows(text).len();
        let separator = Self::has_separator_row(text);
        match (rows, separator) {
            (r, true) if r >= 5 => 95,
            (r, true) if r >= 3 => 85,
            (r, _) if r >= 3 => 60,
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

        let rows = Self::pipe_rows(text);
        if rows.len() < 2 {
            return Ok(None);
        }

        let mut fields = ExtractedFields::new();

        // Header is the first grid row; the first non-separator row after it
        // is the record.
        let header = Self::split_cells(rows[0]);
        let record = rows[1..]
            .iter()
            .find(|row| !SEPARATOR_ROW.is_match(row))
            .map(|row| Self::split_cells(row));

        if let Some(record) = record {
            for (idx, cell) in record.iter().enumerate() {
                let Some(name) = header.get(idx) else { break };
                if cell.is_empty() || name.is_empty() {
                    continue;
                }
                match Self::core_slot(name) {
                    Some(0) => fields.expediente.get_or_insert_with(|| cell.clone()),
                    Some(1) => fields.causa.get_or_insert_with(|| cell.clone()),
                    Some(2) => fields.accion_solicitada.get_or_insert_with(|| cell.clone()),
                    _ => fields
                        .additional_fields
                        .entry(Self::slug(name))
                        .or_insert_with(|| cell.clone()),
                };
            }
        }

        if cancel.is_cancelled() {
            return Err(ExtractError::Cancelled);
        }

        // The grid may not carry everything; fall back to the shared pattern
        // tables over the full text for whatever is still unset.
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

        if cancel.is_cancelled() {
            return Err(ExtractError::Cancelled);
        }

        patterns::harvest_montos(text, &mut fields);
        patterns::harvest_fechas(text, &mut fields);

        if fields.is_empty() {
            debug!("table strategy found a grid but no usable fields");
            return Ok(None);
        }
        Ok(Some(fields))
    }
}
