use chrono::{Datelike, NaiveDate, Utc};

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// Lenient numeric parse used by every form-facing field: accepts a comma
/// decimal separator and falls back to 0 instead of rejecting the input.
pub fn parse_amount(value: &str) -> f64 {
    value.trim().replace(',', ".").parse::<f64>().unwrap_or(0.0)
}

/// Lenient integer parse with the same fallback-to-zero policy.
pub fn parse_count(value: &str) -> i64 {
    value.trim().parse::<i64>().unwrap_or(0)
}

/// Normalizes a free-typed date to `YYYY-MM-DD`, passing unrecognized input
/// through unchanged.
pub fn normalize_date(value: &str) -> String {
    let raw = value.trim();
    if raw.is_empty() {
        return String::new();
    }

    let formats = ["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y", "%Y/%m/%d", "%Y.%m.%d"];
    for fmt in formats.iter() {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return date.format("%Y-%m-%d").to_string();
        }
    }
    raw.to_string()
}

/// Human-readable invoice id in the `INV-<year>-<nnnn>` form.
pub fn new_invoice_id() -> String {
    format!("INV-{}-{:04}", Utc::now().year(), random_suffix(10_000))
}

/// SKU fallback used when the catalog form leaves the field blank.
pub fn fallback_sku() -> String {
    format!("SKU-{:03}", random_suffix(1_000))
}

fn random_suffix(modulus: u32) -> u32 {
    let uuid = uuid::Uuid::new_v4();
    let bytes = uuid.as_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) % modulus
}
