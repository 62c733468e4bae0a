//! Error types for field mapping

use thiserror::Error;

/// Errors that can occur while mapping template fields.
///
/// Messages carry the offending field path or rule and the proximate cause
/// only; no internal detail leaks to callers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    /// A required source path did not resolve on the source object
    #[error("Required field missing: {path}")]
    RequiredFieldMissing {
        /// The unresolvable source path
        path: String,
    },

    /// A validation rule was violated
    #[error("Validation failed for '{field}': {reason}")]
    ValidationFailed {
        /// Target field under validation
        field: String,
        /// Violated rule and proximate cause
        reason: String,
    },

    /// The transform expression names an unknown operation
    #[error("Unsupported transform '{name}' in field '{field}'")]
    UnsupportedTransform {
        /// Target field the transform belongs to
        field: String,
        /// Unrecognized operation name
        name: String,
    },

    /// The transform expression is malformed
    #[error("Invalid transform expression for '{field}': {reason}")]
    InvalidTransform {
        /// Target field the transform belongs to
        field: String,
        /// Parse or argument problem
        reason: String,
    },

    /// The resolved value cannot be rendered in the mapping's data type
    #[error("Cannot format '{field}' as {data_type}: {reason}")]
    FormatFailed {
        /// Target field being formatted
        field: String,
        /// Declared data type
        data_type: String,
        /// Proximate cause
        reason: String,
    },

    /// Null or structurally invalid argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The cancellation token was tripped between mappings
    #[error("Mapping cancelled")]
    Cancelled,
}
