//! Error types for drift detection

use thiserror::Error;

/// Errors that can occur during schema drift analysis
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DriftError {
    /// The source object is not a composite (object) value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A required template field is missing with no rename candidate
    #[error("Template incompatible with source: required field '{path}' is missing and no rename candidate was found")]
    Incompatible {
        /// The unrecoverable template path
        path: String,
    },
}
