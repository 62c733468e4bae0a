//! Configuration for strategy orchestration

/// Configuration for the [`StrategyOrchestrator`](crate::StrategyOrchestrator)
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Merge `additional_fields`/`montos`/`fechas` from runner-up strategies
    /// into the winner's result
    pub merge_complements: bool,

    /// Minimum confidence (0-100) a runner-up needs for its secondary fields
    /// to be merged
    pub complement_threshold: u8,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            merge_complements: true,
            complement_threshold: 50,
        }
    }
}

impl OrchestratorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.complement_threshold > 100 {
            return Err("complement_threshold must be in 0..=100".to_string());
        }
        Ok(())
    }
}
