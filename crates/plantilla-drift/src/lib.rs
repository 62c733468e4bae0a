//! Plantilla Schema Evolution Detector
//!
//! Compares a live source object's field set against an active template,
//! classifies new/missing/renamed fields with an overall severity, and
//! proposes fresh mappings for never-seen source shapes.
//!
//! # Overview
//!
//! Upstream systems rename fields without notice. Rather than failing every
//! export, the detector fuzzy-matches missing template fields against
//! unmatched new source fields; a confidently recoverable rename keeps a
//! template usable and keeps severity below High.
//!
//! # Example Usage
//!
//! ```no_run
//! use plantilla_drift::DriftDetector;
//! # use plantilla_domain::{TemplateDefinition, DriftSeverity};
//! use serde_json::json;
//!
//! # fn example(template: &TemplateDefinition) -> Result<(), Box<dyn std::error::Error>> {
//! let source = json!({ "ClientNumero": "C-88" });
//! let report = DriftDetector::detect_drift(&source, template)?;
//! if report.severity >= DriftSeverity::High {
//!     eprintln!("template needs attention: {:?}", report.missing_fields);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod similarity;
mod detector;
mod suggest;

pub use detector::DriftDetector;
pub use error::DriftError;
pub use similarity::field_similarity;
pub use suggest::{humanize_field_name, infer_data_type};
