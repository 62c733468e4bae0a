//! The extraction strategy capability

use crate::ExtractError;
use async_trait::async_trait;
use plantilla_domain::{CancellationToken, ExtractedFields};

/// A competing extraction strategy.
///
/// Strategies are stateless and side-effect-free; callers may probe and run
/// several concurrently. New document shapes are supported by adding another
/// implementation, never by branching on a type tag.
#[async_trait]
pub trait ExtractionStrategy: Send + Sync {
    /// Stable strategy name, used in logs
    fn name(&self) -> &'static str;

    /// Fixed tie-break priority: when two strategies report the same
    /// confidence, the lower priority value wins. Never derived from
    /// registration order.
    fn priority(&self) -> u8;

    /// Cheap viability gate; called before confidence scoring
    async fn can_extract(&self, text: &str) -> bool;

    /// Self-reported extraction quality for this text, 0-100
    async fn confidence(&self, text: &str) -> u8;

    /// Extract a candidate field set.
    ///
    /// Returns `Ok(None)` for empty/whitespace text or when nothing usable
    /// was found; a populated result always carries at least one non-empty
    /// field or entry. The token is checked between extraction phases.
    async fn extract(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<ExtractedFields>, ExtractError>;
}
