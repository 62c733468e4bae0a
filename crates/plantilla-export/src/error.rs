//! Error types for export operations

use plantilla_domain::TemplateStoreError;
use plantilla_mapping::MapError;
use thiserror::Error;

/// Errors that can occur during export
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    /// Template retrieval failed (absent, inactive, or conflicting)
    #[error("Template store: {0}")]
    Store(#[from] TemplateStoreError),

    /// Field mapping failed (required path, validation, transform)
    #[error("Field mapping: {0}")]
    Mapping(MapError),

    /// The mapped fields could not be rendered into the target shape
    #[error("Render failed: {0}")]
    Render(String),

    /// Null or structurally invalid argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The cancellation token was tripped mid-operation
    #[error("Export cancelled")]
    Cancelled,
}

impl From<MapError> for ExportError {
    fn from(err: MapError) -> Self {
        // Cancellation stays distinct from mapping failures.
        match err {
            MapError::Cancelled => ExportError::Cancelled,
            other => ExportError::Mapping(other),
        }
    }
}
