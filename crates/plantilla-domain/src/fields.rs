//! Extracted field set produced by extraction strategies

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A monetary amount recognized in document text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monto {
    /// Canonical 3-letter currency code (e.g. "CLP", "USD", "UF")
    pub currency: String,

    /// Parsed numeric value
    pub value: Decimal,

    /// The text fragment the amount was parsed from
    pub raw_text: String,
}

/// Candidate field set extracted from raw document text.
///
/// A strategy returns either a populated instance with at least one non-empty
/// field or entry, or no instance at all; an all-empty sentinel is not valid.
/// Callers should use [`ExtractedFields::is_empty`] before handing a candidate
/// downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFields {
    /// Case identifier (expediente number)
    pub expediente: Option<String>,

    /// Legal cause, free text
    pub causa: Option<String>,

    /// Requested action, free text
    pub accion_solicitada: Option<String>,

    /// Extended fields keyed by canonical name (document reference,
    /// issuing authority, tax id, account/bank identifiers, ...)
    pub additional_fields: HashMap<String, String>,

    /// Monetary amounts, in order of appearance
    pub montos: Vec<Monto>,

    /// Date strings, ordered and de-duplicated
    pub fechas: Vec<String>,
}

impl ExtractedFields {
    /// Create an empty field set
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no field, amount, or date has been populated
    pub fn is_empty(&self) -> bool {
        self.expediente.is_none()
            && self.causa.is_none()
            && self.accion_solicitada.is_none()
            && self.additional_fields.is_empty()
            && self.montos.is_empty()
            && self.fechas.is_empty()
    }

    /// Append a date unless it is already present (order preserved)
    pub fn push_fecha(&mut self, fecha: impl Into<String>) {
        let fecha = fecha.into();
        if !self.fechas.contains(&fecha) {
            self.fechas.push(fecha);
        }
    }

    /// Merge additional fields, amounts, and dates from a secondary candidate.
    ///
    /// Additive only: entries already present on `self` are never overwritten.
    /// The core trio is not touched.
    pub fn merge_complement(&mut self, other: &ExtractedFields) {
        for (key, value) in &other.additional_fields {
            self.additional_fields
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        for monto in &other.montos {
            if !self.montos.iter().any(|m| m.raw_text == monto.raw_text) {
                self.montos.push(monto.clone());
            }
        }
        for fecha in &other.fechas {
            self.push_fecha(fecha.clone());
        }
    }
}
