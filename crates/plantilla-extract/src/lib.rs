//! Plantilla Extractor
//!
//! Converts raw document text into candidate field sets using competing
//! extraction strategies.
//!
//! # Overview
//!
//! Upstream recognition produces plain text of unpredictable shape: a
//! pipe-delimited grid one day, narrative prose the next, labeled lines in
//! between. Instead of one brittle parser, several strategies each judge
//! their own applicability and report a 0-100 confidence score; the
//! orchestrator runs the viable ones and picks a winner deterministically.
//!
//! # Architecture
//!
//! ```text
//! Text → [TableStrategy | HybridStrategy | NarrativeStrategy] → candidates
//!            → StrategyOrchestrator (max confidence, fixed tie-break)
//!            → ExtractedFields
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use plantilla_extract::{StrategyOrchestrator, OrchestratorConfig};
//! use plantilla_domain::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator = StrategyOrchestrator::with_default_strategies(
//!     OrchestratorConfig::default(),
//! );
//!
//! let text = "EXPEDIENTE N° C-1234-2024\nCAUSA: Cobro de pesos\n";
//! let token = CancellationToken::new();
//!
//! if let Some(fields) = orchestrator.extract(text, &token).await? {
//!     println!("expediente: {:?}", fields.expediente);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod config;
mod strategy;
mod patterns;
mod table;
mod narrative;
mod hybrid;
mod orchestrator;


pub use error::ExtractError;
pub use config::OrchestratorConfig;
pub use strategy::ExtractionStrategy;
pub use table::TableStrategy;
pub use narrative::NarrativeStrategy;
pub use hybrid::HybridStrategy;
pub use orchestrator::StrategyOrchestrator;
