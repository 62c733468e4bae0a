//! End-to-end exporter tests over the in-memory store

use chrono::{TimeZone, Utc};
use plantilla_domain::{
    CancellationToken, Cancellable, DataType, FieldMapping, TemplateDefinition, TemplateStore,
    TemplateType,
};
use plantilla_export::{AdaptiveExporter, ExportError};
use plantilla_mapping::MapError;
use plantilla_store::MemoryTemplateStore;
use serde_json::json;

fn cobranza_template(template_type: TemplateType, version: &str) -> TemplateDefinition {
    let mut monto = FieldMapping::new("Deuda.Total", "Monto")
        .with_data_type(DataType::Decimal)
        .with_display_order(3);
    monto.validation_rules = vec!["Range:0,100000000".to_string()];

    TemplateDefinition {
        template_id: format!("cobranza-{}-{}", template_type, version),
        template_type,
        version: version.to_string(),
        name: "Informe de Cobranza".to_string(),
        description: None,
        field_mappings: vec![
            // Declared out of display order on purpose.
            monto,
            FieldMapping::new("ExpedienteId", "Expediente")
                .required()
                .with_display_order(1),
            FieldMapping::new("Causa", "Causa")
                .with_default("")
                .with_display_order(2),
        ],
        is_active: false,
        effective_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        expiration_date: None,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        created_by: "integration-tests".to_string(),
    }
}

async fn exporter_with_active(
    template_type: TemplateType,
) -> AdaptiveExporter<MemoryTemplateStore> {
    let store = MemoryTemplateStore::new();
    let template = cobranza_template(template_type, "1.0");
    let id = template.template_id.clone();
    store.save_template(template).await.unwrap();
    store.activate_template(&id).await.unwrap();
    AdaptiveExporter::new(store)
}

fn source() -> serde_json::Value {
    json!({
        "ExpedienteId": "A/B123-2024-01-X",
        "Causa": null,
        "Deuda": { "Total": "2500000.5" }
    })
}

#[tokio::test]
async fn export_tabular_honors_display_order() {
    let exporter = exporter_with_active(TemplateType::Tabular).await;
    let token = CancellationToken::new();

    let bytes = exporter
        .export(&source(), TemplateType::Tabular, &token)
        .await
        .unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "Expediente,Causa,Monto");
    assert_eq!(lines[1], "A/B123-2024-01-X,,2500000.50");
}

#[tokio::test]
async fn preview_returns_mapped_pairs_without_artifact() {
    let exporter = exporter_with_active(TemplateType::Markup).await;
    let token = CancellationToken::new();

    let mapped = exporter
        .preview_mapping(&source(), TemplateType::Markup, &token)
        .await
        .unwrap();
    assert_eq!(
        mapped[0],
        ("Expediente".to_string(), "A/B123-2024-01-X".to_string())
    );
    // Optional null maps to its default, empty string.
    assert_eq!(mapped[1], ("Causa".to_string(), String::new()));
}

#[tokio::test]
async fn validate_export_fails_only_on_required_field() {
    let exporter = exporter_with_active(TemplateType::Document).await;
    let token = CancellationToken::new();

    // Optional Causa and Monto both missing: still valid.
    let partial = json!({ "ExpedienteId": "C-1" });
    exporter
        .validate_export(&partial, TemplateType::Document, &token)
        .await
        .unwrap();

    // Required Expediente missing: MappingError naming the path.
    let broken = json!({ "Causa": "Cobro" });
    let err = exporter
        .validate_export(&broken, TemplateType::Document, &token)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ExportError::Mapping(MapError::RequiredFieldMissing {
            path: "ExpedienteId".to_string()
        })
    );
}

#[tokio::test]
async fn export_with_version_pins_historical_template() {
    let store = MemoryTemplateStore::new();
    let v1 = cobranza_template(TemplateType::Tabular, "1.0");
    let mut v2 = cobranza_template(TemplateType::Tabular, "2.0");
    v2.field_mappings
        .push(FieldMapping::new("Deuda.Interes", "Interes").with_display_order(4));
    let v2_id = v2.template_id.clone();
    store.save_template(v1).await.unwrap();
    store.save_template(v2).await.unwrap();
    store.activate_template(&v2_id).await.unwrap();

    let exporter = AdaptiveExporter::new(store);
    let token = CancellationToken::new();

    let pinned = exporter
        .export_with_version(&source(), TemplateType::Tabular, "1.0", &token)
        .await
        .unwrap();
    let text = String::from_utf8(pinned).unwrap();
    // The pinned 1.0 layout has no Interes column even though 2.0 is active.
    assert!(!text.contains("Interes"));
}

#[tokio::test]
async fn cache_serves_stale_template_until_cleared() {
    let store = MemoryTemplateStore::new();
    let v1 = cobranza_template(TemplateType::Tabular, "1.0");
    let mut v2 = cobranza_template(TemplateType::Tabular, "2.0");
    v2.field_mappings
        .push(FieldMapping::new("Deuda.Interes", "Interes").with_display_order(4));
    let v1_id = v1.template_id.clone();
    let v2_id = v2.template_id.clone();
    store.save_template(v1).await.unwrap();
    store.save_template(v2).await.unwrap();
    store.activate_template(&v1_id).await.unwrap();

    let exporter = AdaptiveExporter::new(store.clone());
    let token = CancellationToken::new();

    // Prime the cache with 1.0.
    exporter
        .export(&source(), TemplateType::Tabular, &token)
        .await
        .unwrap();

    // Activating 2.0 does not invalidate the exporter's cache: the preview
    // still follows the cached 1.0 layout.
    store.activate_template(&v2_id).await.unwrap();
    let stale = exporter
        .preview_mapping(&source(), TemplateType::Tabular, &token)
        .await
        .unwrap();
    assert!(!stale.iter().any(|(target, _)| target == "Interes"));

    // After an explicit clear the store is consulted again and 2.0 wins.
    exporter.clear_cache();
    let fresh = exporter
        .preview_mapping(&source(), TemplateType::Tabular, &token)
        .await
        .unwrap();
    assert!(fresh.iter().any(|(target, _)| target == "Interes"));
}

#[tokio::test]
async fn availability_probe_never_throws() {
    let exporter = AdaptiveExporter::new(MemoryTemplateStore::new());
    assert!(!exporter.is_template_available(TemplateType::Markup).await);
}

#[tokio::test]
async fn missing_active_template_is_a_store_error() {
    let exporter = AdaptiveExporter::new(MemoryTemplateStore::new());
    let token = CancellationToken::new();
    let err = exporter
        .export(&source(), TemplateType::Markup, &token)
        .await
        .unwrap_err();
    assert!(matches!(err, ExportError::Store(_)));
}

#[tokio::test]
async fn cancelled_export_is_distinct_from_failure() {
    let exporter = exporter_with_active(TemplateType::Tabular).await;
    let token = CancellationToken::new();
    token.cancel();

    let err = exporter
        .export(&source(), TemplateType::Tabular, &token)
        .await
        .unwrap_err();
    assert_eq!(err, ExportError::Cancelled);
}
