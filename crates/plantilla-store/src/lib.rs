//! Plantilla Storage Layer
//!
//! In-memory reference implementation of the
//! [`TemplateStore`](plantilla_domain::TemplateStore) contract.
//!
//! # Architecture
//!
//! A single `tokio::sync::RwLock` over the template list. Holding the write
//! lock across `activate_template`'s deactivate-then-activate sequence gives
//! the contract's all-or-nothing guarantee. Durable backends implement the
//! same trait elsewhere; the engine never depends on this crate directly.
//!
//! # Thread Safety
//!
//! `MemoryTemplateStore` is `Send + Sync`; clone it freely, all clones share
//! one template list.

#![warn(missing_docs)]

use async_trait::async_trait;
use chrono::Utc;
use plantilla_domain::{TemplateDefinition, TemplateStore, TemplateStoreError, TemplateType};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// In-memory, concurrency-safe template store
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplateStore {
    templates: Arc<RwLock<Vec<TemplateDefinition>>>,
}

impl MemoryTemplateStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored templates (all types, all versions)
    pub async fn len(&self) -> usize {
        self.templates.read().await.len()
    }

    /// True when the store holds no templates
    pub async fn is_empty(&self) -> bool {
        self.templates.read().await.is_empty()
    }
}

#[async_trait]
impl TemplateStore for MemoryTemplateStore {
    async fn get_template(
        &self,
        template_type: TemplateType,
        version: &str,
    ) -> Result<TemplateDefinition, TemplateStoreError> {
        let templates = self.templates.read().await;
        templates
            .iter()
            .find(|t| t.template_type == template_type && t.version == version)
            .cloned()
            .ok_or_else(|| TemplateStoreError::NotFound {
                template_type,
                version: version.to_string(),
            })
    }

    async fn get_active_template(
        &self,
        template_type: TemplateType,
    ) -> Result<TemplateDefinition, TemplateStoreError> {
        let now = Utc::now();
        let templates = self.templates.read().await;
        templates
            .iter()
            .find(|t| t.template_type == template_type && t.is_active && t.is_effective_at(now))
            .cloned()
            .ok_or(TemplateStoreError::NoActiveTemplate(template_type))
    }

    async fn get_all_versions(
        &self,
        template_type: TemplateType,
    ) -> Result<Vec<TemplateDefinition>, TemplateStoreError> {
        let templates = self.templates.read().await;
        Ok(templates
            .iter()
            .filter(|t| t.template_type == template_type)
            .cloned()
            .collect())
    }

    async fn save_template(
        &self,
        template: TemplateDefinition,
    ) -> Result<(), TemplateStoreError> {
        if template.template_id.trim().is_empty() {
            return Err(TemplateStoreError::InvalidInput(
                "template_id must not be empty".to_string(),
            ));
        }
        if template.version.trim().is_empty() {
            return Err(TemplateStoreError::InvalidInput(
                "version must not be empty".to_string(),
            ));
        }

        let mut templates = self.templates.write().await;
        if templates.iter().any(|t| t.template_id == template.template_id) {
            return Err(TemplateStoreError::DuplicateId(template.template_id));
        }
        if templates
            .iter()
            .any(|t| t.template_type == template.template_type && t.version == template.version)
        {
            return Err(TemplateStoreError::DuplicateVersion {
                template_type: template.template_type,
                version: template.version,
            });
        }
        info!(
            template_id = %template.template_id,
            template_type = %template.template_type,
            version = %template.version,
            "template saved"
        );
        templates.push(template);
        Ok(())
    }

    async fn delete_template(&self, template_id: &str) -> Result<(), TemplateStoreError> {
        let mut templates = self.templates.write().await;
        let Some(index) = templates.iter().position(|t| t.template_id == template_id) else {
            return Err(TemplateStoreError::InvalidInput(format!(
                "unknown template id: {}",
                template_id
            )));
        };
        if templates[index].is_active {
            return Err(TemplateStoreError::DeleteActive(template_id.to_string()));
        }
        templates.remove(index);
        debug!(template_id, "template deleted");
        Ok(())
    }

    async fn activate_template(&self, template_id: &str) -> Result<(), TemplateStoreError> {
        // One write lock spans deactivation and activation: all-or-nothing.
        let mut templates = self.templates.write().await;
        let Some(target) = templates.iter().position(|t| t.template_id == template_id) else {
            return Err(TemplateStoreError::InvalidInput(format!(
                "unknown template id: {}",
                template_id
            )));
        };
        let target_type = templates[target].template_type;
        for template in templates.iter_mut() {
            if template.template_type == target_type {
                template.is_active = false;
            }
        }
        templates[target].is_active = true;
        info!(template_id, template_type = %target_type, "template activated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use plantilla_domain::FieldMapping;

    fn template(id: &str, template_type: TemplateType, version: &str) -> TemplateDefinition {
        TemplateDefinition {
            template_id: id.to_string(),
            template_type,
            version: version.to_string(),
            name: format!("{} {}", template_type, version),
            description: None,
            field_mappings: vec![FieldMapping::new("Expediente", "Expediente")],
            is_active: false,
            effective_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            expiration_date: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            created_by: "tests".to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_and_get_by_version() {
        let store = MemoryTemplateStore::new();
        store
            .save_template(template("t1", TemplateType::Tabular, "1.0"))
            .await
            .unwrap();

        let found = store.get_template(TemplateType::Tabular, "1.0").await.unwrap();
        assert_eq!(found.template_id, "t1");
        assert!(matches!(
            store.get_template(TemplateType::Tabular, "9.9").await,
            Err(TemplateStoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_active_lookup_honors_effective_window() {
        let store = MemoryTemplateStore::new();
        let mut expired = template("t-old", TemplateType::Markup, "1.0");
        expired.is_active = true;
        expired.expiration_date = Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        store.save_template(expired).await.unwrap();

        // Active flag alone is not enough once the window has closed.
        assert!(matches!(
            store.get_active_template(TemplateType::Markup).await,
            Err(TemplateStoreError::NoActiveTemplate(TemplateType::Markup))
        ));
    }

    #[tokio::test]
    async fn test_delete_rejected_while_active() {
        let store = MemoryTemplateStore::new();
        store
            .save_template(template("t1", TemplateType::Document, "1.0"))
            .await
            .unwrap();
        store.activate_template("t1").await.unwrap();

        assert_eq!(
            store.delete_template("t1").await,
            Err(TemplateStoreError::DeleteActive("t1".to_string()))
        );

        store
            .save_template(template("t2", TemplateType::Document, "2.0"))
            .await
            .unwrap();
        store.activate_template("t2").await.unwrap();
        store.delete_template("t1").await.unwrap();
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_empty_identity_rejected() {
        let store = MemoryTemplateStore::new();
        let bad = template("  ", TemplateType::Tabular, "1.0");
        assert!(matches!(
            store.save_template(bad).await,
            Err(TemplateStoreError::InvalidInput(_))
        ));
    }
}
