//! Plantilla Adaptive Exporter
//!
//! Orchestrates template retrieval, full field mapping, and format-specific
//! rendering into a byte artifact.
//!
//! # Overview
//!
//! The exporter resolves the active template for a type (cache-first), maps
//! every field of a composite source object in display order, and renders the
//! result as a tabular grid, hierarchical markup, or flow document. Dry-run
//! validation and mapping preview are exposed for callers that want to probe
//! before producing an artifact.
//!
//! # Caching
//!
//! Templates are cached in-process under an injected, concurrency-safe cache
//! with an explicit [`AdaptiveExporter::clear_cache`] hook. The cache is NOT
//! invalidated automatically when a template is activated or deleted in the
//! store; multi-instance deployments must coordinate invalidation themselves.
//!
//! # Example Usage
//!
//! ```no_run
//! use plantilla_export::AdaptiveExporter;
//! # use plantilla_domain::{TemplateStore, TemplateType, CancellationToken};
//! use serde_json::json;
//!
//! # async fn example<S: TemplateStore>(store: S) -> Result<(), Box<dyn std::error::Error>> {
//! let exporter = AdaptiveExporter::new(store);
//! let source = json!({ "Expediente": "C-1234-2024" });
//! let token = CancellationToken::new();
//!
//! let bytes = exporter
//!     .export(&source, TemplateType::Tabular, &token)
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod cache;
mod render;
mod exporter;

pub use cache::TemplateCache;
pub use error::ExportError;
pub use exporter::AdaptiveExporter;
