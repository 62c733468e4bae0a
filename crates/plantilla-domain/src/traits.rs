//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the engine and infrastructure.
//! Storage implementations live in other crates (plantilla-store provides an
//! in-memory reference implementation).

use crate::template::{TemplateDefinition, TemplateType};
use async_trait::async_trait;
use thiserror::Error;

/// Failures a template store can report.
///
/// Conflict variants carry the offending identity so callers can surface the
/// field or template at fault without internal detail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateStoreError {
    /// No template exists for the requested type and version
    #[error("Template not found: {template_type} version {version}")]
    NotFound {
        /// Requested template type
        template_type: TemplateType,
        /// Requested version
        version: String,
    },

    /// No active template exists for the requested type
    #[error("No active template for type: {0}")]
    NoActiveTemplate(TemplateType),

    /// A template with this id already exists (save is insert-only)
    #[error("Duplicate template id: {0}")]
    DuplicateId(String),

    /// A template with this type and version already exists
    #[error("Duplicate template version: {template_type} {version}")]
    DuplicateVersion {
        /// Conflicting template type
        template_type: TemplateType,
        /// Conflicting version
        version: String,
    },

    /// The target of a delete is currently active
    #[error("Cannot delete active template: {0}")]
    DeleteActive(String),

    /// Invalid argument (empty id, empty version, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Backend-specific failure
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Versioned, type-keyed storage for template definitions.
///
/// Implementations must guarantee:
/// - `save_template` is insert-only and rejects duplicate ids and duplicate
///   `(type, version)` pairs, leaving the existing record unmodified
/// - `activate_template` deactivates all sibling versions of the type and
///   activates the target as one all-or-nothing step
/// - `delete_template` rejects deleting the active template
///
/// Returned definitions are owned snapshots; the engine never mutates them.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Get a template by type and exact version
    async fn get_template(
        &self,
        template_type: TemplateType,
        version: &str,
    ) -> Result<TemplateDefinition, TemplateStoreError>;

    /// Get the active template for a type, filtered by the
    /// effective/expiration window at the current instant
    async fn get_active_template(
        &self,
        template_type: TemplateType,
    ) -> Result<TemplateDefinition, TemplateStoreError>;

    /// Get every stored version for a type (order unspecified)
    async fn get_all_versions(
        &self,
        template_type: TemplateType,
    ) -> Result<Vec<TemplateDefinition>, TemplateStoreError>;

    /// Insert a new template definition
    async fn save_template(
        &self,
        template: TemplateDefinition,
    ) -> Result<(), TemplateStoreError>;

    /// Delete a template by id; fails while the template is active
    async fn delete_template(&self, template_id: &str) -> Result<(), TemplateStoreError>;

    /// Atomically make the given template the single active version of
    /// its type
    async fn activate_template(&self, template_id: &str) -> Result<(), TemplateStoreError>;
}
