//! In-process template cache.

use dashmap::DashMap;
use plantilla_domain::{TemplateDefinition, TemplateType};

/// Concurrency-safe key → template cache.
///
/// Explicitly constructed and injected into the exporter, never a process
/// singleton. Invalidation is manual via [`TemplateCache::clear`].
#[derive(Debug, Default)]
pub struct TemplateCache {
    entries: DashMap<String, TemplateDefinition>,
}

impl TemplateCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    fn active_key(template_type: TemplateType) -> String {
        format!("active:{}", template_type)
    }

    fn version_key(template_type: TemplateType, version: &str) -> String {
        format!("version:{}:{}", template_type, version)
    }

    /// Cached active template for a type, if any
    pub fn get_active(&self, template_type: TemplateType) -> Option<TemplateDefinition> {
        self.entries
            .get(&Self::active_key(template_type))
            .map(|entry| entry.clone())
    }

    /// Cache the active template for its type
    pub fn put_active(&self, template: TemplateDefinition) {
        self.entries
            .insert(Self::active_key(template.template_type), template);
    }

    /// Cached pinned version, if any
    pub fn get_version(
        &self,
        template_type: TemplateType,
        version: &str,
    ) -> Option<TemplateDefinition> {
        self.entries
            .get(&Self::version_key(template_type, version))
            .map(|entry| entry.clone())
    }

    /// Cache a pinned version
    pub fn put_version(&self, template: TemplateDefinition) {
        self.entries.insert(
            Self::version_key(template.template_type, &template.version),
            template,
        );
    }

    /// Drop every cached entry
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
