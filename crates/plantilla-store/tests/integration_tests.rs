//! Contract tests for the template store invariants

use chrono::{TimeZone, Utc};
use plantilla_domain::{
    FieldMapping, TemplateDefinition, TemplateStore, TemplateStoreError, TemplateType,
};
use plantilla_store::MemoryTemplateStore;

fn template(id: &str, template_type: TemplateType, version: &str) -> TemplateDefinition {
    TemplateDefinition {
        template_id: id.to_string(),
        template_type,
        version: version.to_string(),
        name: format!("{} {}", template_type, version),
        description: Some("contract test fixture".to_string()),
        field_mappings: vec![FieldMapping::new("Expediente", "Expediente").required()],
        is_active: false,
        effective_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        expiration_date: None,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        created_by: "contract-tests".to_string(),
    }
}

#[tokio::test]
async fn duplicate_id_fails_second_save_and_preserves_first() {
    let store = MemoryTemplateStore::new();
    store
        .save_template(template("t1", TemplateType::Tabular, "1.0"))
        .await
        .unwrap();

    let mut imposter = template("t1", TemplateType::Tabular, "2.0");
    imposter.name = "imposter".to_string();
    assert_eq!(
        store.save_template(imposter).await,
        Err(TemplateStoreError::DuplicateId("t1".to_string()))
    );

    // The original record is unmodified.
    let kept = store.get_template(TemplateType::Tabular, "1.0").await.unwrap();
    assert_eq!(kept.name, "tabular 1.0");
    assert!(store
        .get_template(TemplateType::Tabular, "2.0")
        .await
        .is_err());
}

#[tokio::test]
async fn duplicate_type_version_fails_second_save() {
    let store = MemoryTemplateStore::new();
    store
        .save_template(template("t1", TemplateType::Markup, "1.0"))
        .await
        .unwrap();

    assert_eq!(
        store
            .save_template(template("t2", TemplateType::Markup, "1.0"))
            .await,
        Err(TemplateStoreError::DuplicateVersion {
            template_type: TemplateType::Markup,
            version: "1.0".to_string()
        })
    );

    // Same version under a different type is fine.
    store
        .save_template(template("t3", TemplateType::Document, "1.0"))
        .await
        .unwrap();
}

#[tokio::test]
async fn activate_leaves_exactly_one_active_version() {
    let store = MemoryTemplateStore::new();
    for (id, version) in [("t1", "1.0"), ("t2", "1.1"), ("t3", "2.0")] {
        store
            .save_template(template(id, TemplateType::Tabular, version))
            .await
            .unwrap();
    }

    store.activate_template("t2").await.unwrap();
    store.activate_template("t3").await.unwrap();

    let versions = store.get_all_versions(TemplateType::Tabular).await.unwrap();
    let active: Vec<&TemplateDefinition> = versions.iter().filter(|t| t.is_active).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].version, "2.0");

    let resolved = store.get_active_template(TemplateType::Tabular).await.unwrap();
    assert_eq!(resolved.template_id, "t3");
}

#[tokio::test]
async fn activation_is_scoped_to_the_template_type() {
    let store = MemoryTemplateStore::new();
    store
        .save_template(template("tab", TemplateType::Tabular, "1.0"))
        .await
        .unwrap();
    store
        .save_template(template("doc", TemplateType::Document, "1.0"))
        .await
        .unwrap();

    store.activate_template("tab").await.unwrap();
    store.activate_template("doc").await.unwrap();

    // Activating the document template must not touch the tabular one.
    assert!(store.get_active_template(TemplateType::Tabular).await.is_ok());
    assert!(store.get_active_template(TemplateType::Document).await.is_ok());
}

#[tokio::test]
async fn concurrent_reads_share_the_store() {
    let store = MemoryTemplateStore::new();
    store
        .save_template(template("t1", TemplateType::Tabular, "1.0"))
        .await
        .unwrap();
    store.activate_template("t1").await.unwrap();

    let a = store.clone();
    let b = store.clone();
    let (ra, rb) = tokio::join!(
        a.get_active_template(TemplateType::Tabular),
        b.get_active_template(TemplateType::Tabular),
    );
    assert_eq!(ra.unwrap().template_id, rb.unwrap().template_id);
}
