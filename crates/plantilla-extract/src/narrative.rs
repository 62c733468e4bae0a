//! Contextual/narrative extraction strategy.
//!
//! Best signal: keyword-proximity phrases in running prose, the shape of
//! resoluciones and notification letters where nothing is laid out as a grid.

use crate::patterns;
use crate::strategy::ExtractionStrategy;
use crate::ExtractError;
use async_trait::async_trait;
use plantilla_domain::{Cancellable, CancellationToken, ExtractedFields};
use tracing::debug;

/// Keyword groups whose presence signals extractable prose. Each group
/// counts once toward the confidence band.
const KEYWORD_GROUPS: &[&[&str]] = &[
    &["expediente", "exp.", "rol"],
    &["causa", "materia", "caratulado"],
    &["solicita", "ordena", "acción"],
    &["juzgado", "tribunal", "corte", "fiscalía"],
];

/// Extracts fields from narrative prose by keyword proximity
#[derive(Debug, Default, Clone, Copy)]
pub struct NarrativeStrategy;

impl NarrativeStrategy {
    /// Create a new narrative strategy
    pub fn new() -> Self {
        Self
    }

    fn keyword_groups_present(text: &str) -> usize {
        let lower = text.to_lowercase();
        KEYWORD_GROUPS
            .iter()
            .filter(|group| group.iter().any(|kw| lower.contains(kw)))
            .count()
    }
}

#[async_trait]
impl ExtractionStrategy for NarrativeStrategy {
    fn name(&self) -> &'static str {
        "narrative"
    }

    fn priority(&self) -> u8 {
        3
    }

    async fn can_extract(&self, text: &str) -> bool {
        text.trim().len() >= 40 && Self::keyword_groups_present(text) >= 1
    }

    async fn confidence(&self, text: &str) -> u8 {
        match Self::keyword_groups_present(text) {
            0 => 0,
            1 => 50,
            2 => 70,
            _ => 80,
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
        fields.expediente = patterns::first_match(&patterns::EXPEDIENTE_PATTERNS, text);
        fields.causa = patterns::first_match(&patterns::CAUSA_PATTERNS, text);
        fields.accion_solicitada = patterns::first_match(&patterns::ACCION_PATTERNS, text);

        if cancel.is_cancelled() {
            return Err(ExtractError::Cancelled);
        }

        patterns::harvest_extended(text, &mut fields.additional_fields);
        patterns::harvest_montos(text, &mut fields);
        patterns::harvest_fechas(text, &mut fields);

        if fields.is_empty() {
            debug!("narrative strategy found no usable fields");
            return Ok(None);
        }
        Ok(Some(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESOLUCION: &str = "En la causa rol C-5120-2024 del Juzgado de Letras de \
        Valparaíso, caratulado: Fisco con Soto, se solicita el embargo de fondos por \
        $2.500.000, notificado el 12/03/2024.";

    #[tokio::test]
    async fn test_rich_prose_scores_80() {
        let strategy = NarrativeStrategy::new();
        assert_eq!(strategy.confidence(RESOLUCION).await, 80);
    }

    #[tokio::test]
    async fn test_unrelated_prose_scores_0() {
        let strategy = NarrativeStrategy::new();
        let text = "El clima estuvo agradable durante toda la semana en la región.";
        assert_eq!(strategy.confidence(text).await, 0);
        assert!(!strategy.can_extract(text).await);
    }

    #[tokio::test]
    async fn test_extracts_trio_amounts_and_dates() {
        let strategy = NarrativeStrategy::new();
        let token = CancellationToken::new();
        let fields = strategy.extract(RESOLUCION, &token).await.unwrap().unwrap();
        assert_eq!(fields.expediente.as_deref(), Some("C-5120-2024"));
        assert!(fields.accion_solicitada.is_some());
        assert_eq!(fields.montos.len(), 1);
        assert_eq!(fields.fechas, vec!["12/03/2024"]);
        assert!(fields.additional_fields.contains_key("organismo_emisor"));
    }

    #[tokio::test]
    async fn test_no_fields_yields_none_not_empty_sentinel() {
        let strategy = NarrativeStrategy::new();
        let token = CancellationToken::new();
        let result = strategy
            .extract("texto breve sin contenido legal alguno", &token)
            .await
            .unwrap();
        assert_eq!(result, None);
    }
}
