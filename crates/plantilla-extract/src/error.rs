//! Error types for extraction

use thiserror::Error;

/// Errors that can occur during extraction.
///
/// Malformed input is not an error: strategies answer `Ok(None)` for text
/// they cannot make sense of. Cancellation is reported distinctly so callers
/// can tell an aborted run from an empty one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// The cancellation token was tripped mid-extraction
    #[error("Extraction cancelled")]
    Cancelled,
}
