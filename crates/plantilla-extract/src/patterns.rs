//! Shared pattern tables and harvesting helpers.
//!
//! Every strategy extracts the same core trio (expediente, causa, acción
//! solicitada) by trying an ordered pattern list, first match wins, then
//! independently harvests extended fields, dates, and monetary amounts from
//! the full text. The tables live here so variants differ in document-shape
//! detection, not in field vocabulary.

use once_cell::sync::Lazy;
use plantilla_domain::{ExtractedFields, Monto};
use regex::Regex;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("static pattern must compile"))
        .collect()
}

/// Ordered patterns for the case identifier. First match wins.
pub static EXPEDIENTE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)expediente\s*(?:n[°ºo]\.?\s*)?[:\-]?\s*([A-Z0-9][A-Z0-9/\.\-]{3,})",
        r"(?i)\bexp\.?\s*(?:n[°ºo]\.?\s*)?[:\-]\s*([A-Z0-9][A-Z0-9/\.\-]{3,})",
        r"(?i)\brol\s*(?:n[°ºo]\.?\s*)?[:\-]?\s*([A-Z]-?\d+[/\-]\d{2,4})",
        r"(?i)\bcausa\s+n[°ºo]\.?\s*([A-Z0-9][A-Z0-9/\.\-]{3,})",
    ])
});

/// Ordered patterns for the legal cause. First match wins.
pub static CAUSA_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)\bcausa\s*[:\-]\s*([^\n|]{3,120})",
        r"(?i)\bmateria\s*[:\-]\s*([^\n|]{3,120})",
        r"(?i)\bcaratulado\s*[:\-]?\s*[\x{201c}\x{201d}\x{ab}\x{bb}]?([^\n|,\x{201c}\x{201d}]{3,80})",
        r"(?i)\bpor\s+concepto\s+de\s+([^\n|,\.]{3,80})",
    ])
});

/// Ordered patterns for the requested action. First match wins.
pub static ACCION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)acci[oó]n\s+solicitada\s*[:\-]\s*([^\n|]{3,120})",
        r"(?i)\bse\s+solicita\s+(?:la\s+|el\s+)?([^\n|,\.]{3,100})",
        r"(?i)\bsol[ií]cita\s*[:\-]\s*([^\n|]{3,120})",
        r"(?i)\bse\s+ordena\s+(?:la\s+|el\s+)?([^\n|,\.]{3,100})",
    ])
});

/// Extended field harvest: canonical key → pattern with one capture group.
/// All entries are tried; every hit lands in `additional_fields`.
static EXTENDED_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    let table: &[(&str, &str)] = &[
        (
            "numero_documento",
            r"(?i)\bdocumento\s*(?:n[°ºo]\.?\s*)?[:\-]?\s*(\d{4,})",
        ),
        (
            "organismo_emisor",
            r"(?i)\b((?:juzgado|tribunal|corte|fiscal[ií]a)\s[^\n|,\.]{3,80})",
        ),
        ("rut", r"\b(\d{1,2}\.?\d{3}\.?\d{3}-[\dkK])\b"),
        (
            "numero_cuenta",
            r"(?i)\bcuenta\s*(?:corriente\s*)?(?:n[°ºo]\.?\s*)?[:\-]?\s*([\d\-]{6,20})",
        ),
        ("banco", r"(?i)\b(banco\s+[a-záéíóúñA-ZÁÉÍÓÚÑ]+(?:\s+[a-záéíóúñA-ZÁÉÍÓÚÑ]+)?)"),
    ];
    table
        .iter()
        .map(|(k, p)| (*k, Regex::new(p).expect("static pattern must compile")))
        .collect()
});

/// Date shapes recognized by the harvest, tried in order over the whole text
static FECHA_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"\b(\d{4}-\d{2}-\d{2})\b",
        r"\b(\d{1,2}[/-]\d{1,2}[/-]\d{4})\b",
        r"(?i)\b(\d{1,2}\s+de\s+[a-záéíóúñ]+\s+de\s+\d{4})\b",
    ])
});

/// Prefix currency markers: `US$ 1.500`, `$2.000.000`, `UF 3.000`
static MONTO_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(US\$|U\$S|USD|EUR|€|CLF|CLP|UF|\$)\s*([0-9][0-9\.,]*)")
        .expect("static pattern must compile")
});

/// Suffix currency markers: `1.500 pesos`, `3.000 UF`
static MONTO_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b([0-9][0-9\.,]*)\s*(pesos|d[oó]lares|euros|UF|CLF)\b")
        .expect("static pattern must compile")
});

/// Normalize a currency symbol or suffix to a canonical 3-letter code.
///
/// Unrecognized and bare-peso markers default to the local currency (CLP).
pub fn normalize_currency(marker: &str) -> &'static str {
    match marker.to_lowercase().as_str() {
        "us$" | "u$s" | "usd" | "dólares" | "dolares" => "USD",
        "eur" | "€" | "euros" => "EUR",
        "uf" | "clf" => "CLF",
        _ => "CLP",
    }
}

/// Try an ordered pattern list; return the first capture, trimmed
pub fn first_match(patterns: &[Regex], text: &str) -> Option<String> {
    for pattern in patterns {
        if let Some(caps) = pattern.captures(text) {
            if let Some(m) = caps.get(1) {
                let value = m.as_str().trim().trim_end_matches(['.', ',']).trim();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

/// Collect extended fields (document reference, issuing authority, tax id,
/// account and bank identifiers) into the candidate's additional fields.
/// Existing entries are never overwritten.
pub fn harvest_extended(text: &str, fields: &mut HashMap<String, String>) {
    for (key, pattern) in EXTENDED_PATTERNS.iter() {
        if fields.contains_key(*key) {
            continue;
        }
        if let Some(caps) = pattern.captures(text) {
            if let Some(m) = caps.get(1) {
                let value = m.as_str().trim().to_string();
                if !value.is_empty() {
                    fields.insert((*key).to_string(), value);
                }
            }
        }
    }
}

/// Collect date strings in order of appearance, de-duplicated
pub fn harvest_fechas(text: &str, fields: &mut ExtractedFields) {
    // Order of appearance, not pattern order: gather (offset, text) first.
    let mut hits: Vec<(usize, String)> = Vec::new();
    for pattern in FECHA_PATTERNS.iter() {
        for caps in pattern.captures_iter(text) {
            if let Some(m) = caps.get(1) {
                hits.push((m.start(), m.as_str().to_string()));
            }
        }
    }
    hits.sort_by_key(|(start, _)| *start);
    for (_, fecha) in hits {
        fields.push_fecha(fecha);
    }
}

/// Parse a localized amount literal into a `Decimal`.
///
/// Accepts Chilean notation (`1.234.567,89`), plain groups (`1.500`), and
/// anglo notation (`1,234.56`). Returns `None` rather than failing on noise.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let raw = raw.trim().trim_end_matches(['.', ',']);
    if raw.is_empty() {
        return None;
    }
    let has_dot = raw.contains('.');
    let has_comma = raw.contains(',');

    let normalized = if has_dot && has_comma {
        // The separator appearing last is the decimal mark.
        let last_dot = raw.rfind('.').unwrap_or(0);
        let last_comma = raw.rfind(',').unwrap_or(0);
        if last_comma > last_dot {
            raw.replace('.', "").replace(',', ".")
        } else {
            raw.replace(',', "")
        }
    } else if has_comma {
        let after = raw.rsplit(',').next().unwrap_or("");
        if raw.matches(',').count() == 1 && after.len() <= 2 {
            raw.replace(',', ".")
        } else {
            raw.replace(',', "")
        }
    } else if has_dot {
        // Dot groups of exactly three digits read as thousands separators.
        if raw.split('.').skip(1).all(|g| g.len() == 3) {
            raw.replace('.', "")
        } else {
            raw.to_string()
        }
    } else {
        raw.to_string()
    };

    Decimal::from_str(&normalized).ok()
}

/// Collect monetary amounts with normalized currency codes, in order of
/// appearance, de-duplicated by raw text fragment
pub fn harvest_montos(text: &str, fields: &mut ExtractedFields) {
    let mut hits: Vec<(usize, Monto)> = Vec::new();

    for caps in MONTO_PREFIX.captures_iter(text) {
        let (Some(marker), Some(amount)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        if let Some(value) = parse_amount(amount.as_str()) {
            hits.push((
                marker.start(),
                Monto {
                    currency: normalize_currency(marker.as_str()).to_string(),
                    value,
                    raw_text: caps.get(0).map(|m| m.as_str().trim().to_string()).unwrap_or_default(),
                },
            ));
        }
    }

    for caps in MONTO_SUFFIX.captures_iter(text) {
        let (Some(amount), Some(marker)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        // Skip literals already claimed by a prefix marker (e.g. "$1.500 pesos").
        if hits.iter().any(|(_, m)| m.raw_text.contains(amount.as_str())) {
            continue;
        }
        if let Some(value) = parse_amount(amount.as_str()) {
            hits.push((
                amount.start(),
                Monto {
                    currency: normalize_currency(marker.as_str()).to_string(),
                    value,
                    raw_text: caps.get(0).map(|m| m.as_str().trim().to_string()).unwrap_or_default(),
                },
            ));
        }
    }

    hits.sort_by_key(|(start, _)| *start);
    for (_, monto) in hits {
        if !fields.montos.iter().any(|m| m.raw_text == monto.raw_text) {
            fields.montos.push(monto);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_expediente_first_match_wins() {
        let text = "EXPEDIENTE N° C-1234-2024\nRol: F-99-2023";
        assert_eq!(
            first_match(&EXPEDIENTE_PATTERNS, text),
            Some("C-1234-2024".to_string())
        );
    }

    #[test]
    fn test_causa_stops_at_line_end() {
        let text = "CAUSA: Cobro de pesos\nOtra línea";
        assert_eq!(
            first_match(&CAUSA_PATTERNS, text),
            Some("Cobro de pesos".to_string())
        );
    }

    #[test]
    fn test_accion_from_prose() {
        let text = "Por la presente se solicita el embargo de la cuenta corriente.";
        let accion = first_match(&ACCION_PATTERNS, text).unwrap();
        assert!(accion.starts_with("embargo"));
    }

    #[test]
    fn test_currency_normalization_table() {
        assert_eq!(normalize_currency("$"), "CLP");
        assert_eq!(normalize_currency("pesos"), "CLP");
        assert_eq!(normalize_currency("US$"), "USD");
        assert_eq!(normalize_currency("USD"), "USD");
        assert_eq!(normalize_currency("dólares"), "USD");
        assert_eq!(normalize_currency("€"), "EUR");
        assert_eq!(normalize_currency("UF"), "CLF");
    }

    #[test]
    fn test_parse_amount_chilean_notation() {
        assert_eq!(
            parse_amount("1.234.567,89"),
            Some(Decimal::from_str("1234567.89").unwrap())
        );
        assert_eq!(parse_amount("1.500"), Some(Decimal::from(1500)));
    }

    #[test]
    fn test_parse_amount_anglo_notation() {
        assert_eq!(
            parse_amount("1,234.56"),
            Some(Decimal::from_str("1234.56").unwrap())
        );
    }

    #[test]
    fn test_harvest_montos_orders_and_normalizes() {
        let mut fields = ExtractedFields::new();
        harvest_montos("Se adeudan $2.500.000 más US$ 1.200 de intereses.", &mut fields);
        assert_eq!(fields.montos.len(), 2);
        assert_eq!(fields.montos[0].currency, "CLP");
        assert_eq!(fields.montos[0].value, Decimal::from(2_500_000));
        assert_eq!(fields.montos[1].currency, "USD");
    }

    #[test]
    fn test_harvest_fechas_dedupes_in_order() {
        let mut fields = ExtractedFields::new();
        harvest_fechas(
            "Notificado el 12/03/2024, audiencia el 01/04/2024, plazo desde 12/03/2024.",
            &mut fields,
        );
        assert_eq!(fields.fechas, vec!["12/03/2024", "01/04/2024"]);
    }

    #[test]
    fn test_harvest_extended_rut_and_bank() {
        let mut fields = HashMap::new();
        harvest_extended(
            "Deudor RUT 12.345.678-9, cuenta N° 001-234567-8 del Banco Estado.",
            &mut fields,
        );
        assert_eq!(fields["rut"], "12.345.678-9");
        assert_eq!(fields["banco"], "Banco Estado");
        assert!(fields.contains_key("numero_cuenta"));
    }
}
