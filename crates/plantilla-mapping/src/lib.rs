//! Plantilla Field Mapper
//!
//! Resolves template field mappings against composite source objects:
//! dotted-path lookup, data-type formatting, the transform pipeline, and the
//! validation rules. Fields map one at a time, or a whole template at once in
//! display order.
//!
//! # Overview
//!
//! Source objects are `serde_json::Value` composites assembled by an external
//! fusion stage; templates describe output fields declaratively. The mapper
//! is the only component that interprets the two mini-languages:
//!
//! - transforms: `Trim()|ToUpper()|PadLeft(10,0)`
//! - validation: `Regex:^[A-Z]`, `Range:0,100`, `MinLength:3`, `MaxLength:20`,
//!   `EmailAddress`, `Required`
//!
//! Both are parsed into ordered call tuples dispatched through pure
//! functions; there is no scripting engine.
//!
//! # Example Usage
//!
//! ```no_run
//! use plantilla_mapping::FieldMapper;
//! use plantilla_domain::FieldMapping;
//! use serde_json::json;
//!
//! let source = json!({ "ExpedienteId": "A/B123-2024-01-X" });
//! let mapping = FieldMapping::new("ExpedienteId", "Expediente").required();
//!
//! let value = FieldMapper::map_field(&source, &mapping).unwrap();
//! assert_eq!(value, "A/B123-2024-01-X");
//! ```

#![warn(missing_docs)]

mod error;
mod path;
mod format;
mod transform;
mod validate;
mod mapper;

pub use error::MapError;
pub use mapper::{FieldMapper, MappingDiagnostics};
pub use path::{collect_leaf_paths, resolve_path};
pub use transform::{parse_pipeline, TransformCall};
pub use validate::{parse_rule, ValidationRule};
