//! Plantilla Domain Layer
//!
//! This crate contains the core data model and contracts for the adaptive
//! template-driven extraction and export engine. It defines the fundamental
//! value types that all other layers depend upon, plus the trait boundary a
//! template storage implementation must satisfy.
//!
//! ## Key Concepts
//!
//! - **ExtractedFields**: the candidate field set a strategy pulls out of raw
//!   document text, with its monetary amounts and dates
//! - **TemplateDefinition**: a versioned, typed description of an export's
//!   field set and formatting rules
//! - **FieldMapping**: one row of a template, describing how an output field
//!   derives from a source field
//! - **SchemaDriftReport**: the divergence between a live source object and a
//!   template's expectations
//!
//! ## Architecture
//!
//! Pure data types and trait definitions only. Extraction, mapping, drift
//! detection, storage, and export live in the sibling crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cancel;
pub mod drift;
pub mod fields;
pub mod template;
pub mod traits;

// Re-exports for convenience
pub use cancel::{Cancellable, CancellationToken};
pub use drift::{DriftSeverity, MissingField, NewField, RenamedField, SchemaDriftReport};
pub use fields::{ExtractedFields, Monto};
pub use template::{DataType, FieldMapping, TemplateDefinition, TemplateType};
pub use traits::{TemplateStore, TemplateStoreError};
