//! Strategy orchestration: run viable strategies, pick a winner, merge
//! complements.

use crate::config::OrchestratorConfig;
use crate::strategy::ExtractionStrategy;
use crate::{ExtractError, HybridStrategy, NarrativeStrategy, TableStrategy};
use plantilla_domain::{Cancellable, CancellationToken, ExtractedFields};
use std::sync::Arc;
use tracing::{debug, info};

/// Runs competing extraction strategies and selects the winner.
///
/// Selection is deterministic: the highest self-reported confidence wins, and
/// ties are broken by each strategy's declared priority, never by the order
/// strategies happen to be registered in.
pub struct StrategyOrchestrator {
    strategies: Vec<Arc<dyn ExtractionStrategy>>,
    config: OrchestratorConfig,
}

impl StrategyOrchestrator {
    /// Create an orchestrator over an explicit strategy set
    pub fn new(strategies: Vec<Arc<dyn ExtractionStrategy>>, config: OrchestratorConfig) -> Self {
        Self { strategies, config }
    }

    /// Create an orchestrator with the built-in strategy set
    /// (table, hybrid, narrative)
    pub fn with_default_strategies(config: OrchestratorConfig) -> Self {
        Self::new(
            vec![
                Arc::new(TableStrategy::new()),
                Arc::new(HybridStrategy::new()),
                Arc::new(NarrativeStrategy::new()),
            ],
            config,
        )
    }

    /// Extract a candidate field set from raw document text.
    ///
    /// Returns `Ok(None)` when no strategy is viable or every viable strategy
    /// comes back empty.
    pub async fn extract(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<ExtractedFields>, ExtractError> {
        if cancel.is_cancelled() {
            return Err(ExtractError::Cancelled);
        }
        if text.trim().is_empty() {
            return Ok(None);
        }

        // Cheap viability gate first, confidence only for survivors.
        let mut scored: Vec<(&Arc<dyn ExtractionStrategy>, u8)> = Vec::new();
        for strategy in &self.strategies {
            if !strategy.can_extract(text).await {
                continue;
            }
            let confidence = strategy.confidence(text).await;
            debug!(
                strategy = strategy.name(),
                confidence, "strategy scored input"
            );
            if confidence > 0 {
                scored.push((strategy, confidence));
            }
        }
        if scored.is_empty() {
            return Ok(None);
        }

        // Highest confidence wins; declared priority breaks ties.
        scored.sort_by(|(a, ca), (b, cb)| cb.cmp(ca).then(a.priority().cmp(&b.priority())));

        if cancel.is_cancelled() {
            return Err(ExtractError::Cancelled);
        }

        let (winner, winner_confidence) = scored[0];
        let Some(mut fields) = winner.extract(text, cancel).await? else {
            return Ok(None);
        };
        info!(
            strategy = winner.name(),
            confidence = winner_confidence,
            "extraction winner selected"
        );

        if self.config.merge_complements {
            for (strategy, confidence) in scored.iter().skip(1) {
                if *confidence < self.config.complement_threshold {
                    continue;
                }
                if cancel.is_cancelled() {
                    return Err(ExtractError::Cancelled);
                }
                if let Some(secondary) = strategy.extract(text, cancel).await? {
                    debug!(
                        strategy = strategy.name(),
                        confidence = *confidence,
                        "merging complement fields from runner-up"
                    );
                    fields.merge_complement(&secondary);
                }
            }
        }

        Ok(Some(fields))
    }
}
