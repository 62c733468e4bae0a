//! Format-specific renderers.
//!
//! Every shape renders the same ordered `(target field, value)` pairs; the
//! field order/content contract is identical across formats, only the byte
//! layout differs.

use plantilla_domain::{TemplateDefinition, TemplateType};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

/// Render mapped fields into the template's target shape
pub fn render(
    template: &TemplateDefinition,
    fields: &[(String, String)],
) -> Result<Vec<u8>, String> {
    match template.template_type {
        TemplateType::Tabular => render_tabular(fields),
        TemplateType::Markup => render_markup(template, fields),
        TemplateType::Document => Ok(render_document(template, fields)),
    }
}

/// CSV grid: one header row of target fields, one record of values
fn render_tabular(fields: &[(String, String)]) -> Result<Vec<u8>, String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(fields.iter().map(|(target, _)| target.as_str()))
        .map_err(|e| e.to_string())?;
    writer
        .write_record(fields.iter().map(|(_, value)| value.as_str()))
        .map_err(|e| e.to_string())?;
    writer.into_inner().map_err(|e| e.to_string())
}

/// XML tree: an element per field under a root carrying template identity
fn render_markup(
    template: &TemplateDefinition,
    fields: &[(String, String)],
) -> Result<Vec<u8>, String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| e.to_string())?;

    let mut root = BytesStart::new("export");
    root.push_attribute(("template-id", template.template_id.as_str()));
    root.push_attribute(("template-version", template.version.as_str()));
    writer
        .write_event(Event::Start(root))
        .map_err(|e| e.to_string())?;

    for (target, value) in fields {
        let name = element_name(target);
        writer
            .write_event(Event::Start(BytesStart::new(name.as_str())))
            .map_err(|e| e.to_string())?;
        writer
            .write_event(Event::Text(BytesText::new(value)))
            .map_err(|e| e.to_string())?;
        writer
            .write_event(Event::End(BytesEnd::new(name.as_str())))
            .map_err(|e| e.to_string())?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("export")))
        .map_err(|e| e.to_string())?;
    Ok(writer.into_inner().into_inner())
}

/// Target fields may carry spaces; XML element names cannot
fn element_name(target: &str) -> String {
    let mut name: String = target
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    if name.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    if name.is_empty() {
        name.push('_');
    }
    name
}

/// Flow document: title block plus one labeled paragraph per field
fn render_document(template: &TemplateDefinition, fields: &[(String, String)]) -> Vec<u8> {
    let mut out = String::new();
    out.push_str(&template.name);
    out.push('\n');
    out.push_str(&"=".repeat(template.name.chars().count().max(4)));
    out.push_str("\n\n");
    for (target, value) in fields {
        out.push_str(target);
        out.push_str(": ");
        out.push_str(value);
        out.push('\n');
    }
    out.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use plantilla_domain::FieldMapping;

    fn template(template_type: TemplateType) -> TemplateDefinition {
        TemplateDefinition {
            template_id: "tpl-render".to_string(),
            template_type,
            version: "1.0".to_string(),
            name: "Informe".to_string(),
            description: None,
            field_mappings: vec![FieldMapping::new("a", "A")],
            is_active: true,
            effective_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            expiration_date: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            created_by: "tests".to_string(),
        }
    }

    fn fields() -> Vec<(String, String)> {
        vec![
            ("Expediente".to_string(), "C-1234-2024".to_string()),
            ("Causa".to_string(), "Cobro de pesos".to_string()),
        ]
    }

    #[test]
    fn test_tabular_renders_header_then_record() {
        let bytes = render(&template(TemplateType::Tabular), &fields()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Expediente,Causa");
        assert_eq!(lines[1], "C-1234-2024,Cobro de pesos");
    }

    #[test]
    fn test_markup_carries_template_identity() {
        let bytes = render(&template(TemplateType::Markup), &fields()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains(r#"template-id="tpl-render""#));
        assert!(text.contains("<Expediente>C-1234-2024</Expediente>"));
    }

    #[test]
    fn test_markup_sanitizes_element_names() {
        let fields = vec![("Client Number".to_string(), "88".to_string())];
        let bytes = render(&template(TemplateType::Markup), &fields).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("<Client_Number>88</Client_Number>"));
    }

    #[test]
    fn test_document_renders_labeled_paragraphs() {
        let bytes = render(&template(TemplateType::Document), &fields()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("Informe\n"));
        assert!(text.contains("Expediente: C-1234-2024\n"));
        assert!(text.contains("Causa: Cobro de pesos\n"));
    }

    #[test]
    fn test_field_order_is_preserved_in_every_shape() {
        for shape in [TemplateType::Tabular, TemplateType::Markup, TemplateType::Document] {
            let bytes = render(&template(shape), &fields()).unwrap();
            let text = String::from_utf8(bytes).unwrap();
            let exp = text.find("Expediente").unwrap();
            let causa = text.find("Causa").unwrap();
            assert!(exp < causa, "field order broken for {}", shape);
        }
    }
}
