//! The adaptive exporter.

use crate::cache::TemplateCache;
use crate::error::ExportError;
use crate::render;
use plantilla_domain::{
    Cancellable, CancellationToken, TemplateDefinition, TemplateStore, TemplateType,
};
use plantilla_mapping::FieldMapper;
use serde_json::Value;
use tracing::{debug, info};

/// Exports composite source objects through versioned templates.
///
/// Template lookups are cache-first. The cache is injected and explicitly
/// cleared; activating or deleting a template in the store does not
/// invalidate it. Single-process deployments clear after administrative
/// changes, multi-instance deployments coordinate out-of-band.
pub struct AdaptiveExporter<S: TemplateStore> {
    store: S,
    cache: TemplateCache,
}

impl<S: TemplateStore> AdaptiveExporter<S> {
    /// Create an exporter with a fresh cache
    pub fn new(store: S) -> Self {
        Self::with_cache(store, TemplateCache::new())
    }

    /// Create an exporter over an explicitly constructed cache
    pub fn with_cache(store: S, cache: TemplateCache) -> Self {
        Self { store, cache }
    }

    /// Export a source object through the active template for a type.
    ///
    /// Resolves the template (cache-first), maps every field in display
    /// order, and renders a byte artifact in the template's shape.
    pub async fn export(
        &self,
        source: &Value,
        template_type: TemplateType,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, ExportError> {
        let template = self.resolve_active(template_type).await?;
        self.export_with(source, &template, cancel).await
    }

    /// Export through an explicitly pinned template version, for reproducing
    /// historical exports
    pub async fn export_with_version(
        &self,
        source: &Value,
        template_type: TemplateType,
        version: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, ExportError> {
        let template = self.resolve_version(template_type, version).await?;
        self.export_with(source, &template, cancel).await
    }

    /// Map all fields of the active template without rendering
    pub async fn preview_mapping(
        &self,
        source: &Value,
        template_type: TemplateType,
        cancel: &CancellationToken,
    ) -> Result<Vec<(String, String)>, ExportError> {
        check_source(source)?;
        let template = self.resolve_active(template_type).await?;
        let mapped = FieldMapper::map_all_fields(source, &template, cancel)?;
        Ok(mapped)
    }

    /// Dry-run every mapping of the active template, producing no artifact.
    ///
    /// Fails only on a required-field failure; optional-field problems are
    /// logged by the mapper and ignored here.
    pub async fn validate_export(
        &self,
        source: &Value,
        template_type: TemplateType,
        cancel: &CancellationToken,
    ) -> Result<(), ExportError> {
        check_source(source)?;
        let template = self.resolve_active(template_type).await?;
        FieldMapper::map_all_fields(source, &template, cancel)?;
        Ok(())
    }

    /// Non-throwing probe: is an active template available for the type?
    pub async fn is_template_available(&self, template_type: TemplateType) -> bool {
        if self.cache.get_active(template_type).is_some() {
            return true;
        }
        self.store.get_active_template(template_type).await.is_ok()
    }

    /// Drop every cached template; the next lookup goes to the store
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    async fn export_with(
        &self,
        source: &Value,
        template: &TemplateDefinition,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, ExportError> {
        check_source(source)?;
        if cancel.is_cancelled() {
            return Err(ExportError::Cancelled);
        }

        let mapped = FieldMapper::map_all_fields(source, template, cancel)?;

        if cancel.is_cancelled() {
            return Err(ExportError::Cancelled);
        }

        let bytes = render::render(template, &mapped).map_err(ExportError::Render)?;
        info!(
            template_id = %template.template_id,
            template_type = %template.template_type,
            fields = mapped.len(),
            bytes = bytes.len(),
            "export rendered"
        );
        Ok(bytes)
    }

    async fn resolve_active(
        &self,
        template_type: TemplateType,
    ) -> Result<TemplateDefinition, ExportError> {
        if let Some(cached) = self.cache.get_active(template_type) {
            debug!(template_type = %template_type, "active template served from cache");
            return Ok(cached);
        }
        let template = self.store.get_active_template(template_type).await?;
        self.cache.put_active(template.clone());
        Ok(template)
    }

    async fn resolve_version(
        &self,
        template_type: TemplateType,
        version: &str,
    ) -> Result<TemplateDefinition, ExportError> {
        if let Some(cached) = self.cache.get_version(template_type, version) {
            debug!(
                template_type = %template_type,
                version,
                "pinned template served from cache"
            );
            return Ok(cached);
        }
        let template = self.store.get_template(template_type, version).await?;
        self.cache.put_version(template.clone());
        Ok(template)
    }
}

fn check_source(source: &Value) -> Result<(), ExportError> {
    if source.is_null() {
        return Err(ExportError::InvalidInput(
            "source object must not be null".to_string(),
        ));
    }
    Ok(())
}
