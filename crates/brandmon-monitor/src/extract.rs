//! Projection of raw scraped records onto each platform's normalized fields.

use brandmon_core::{Platform, RawRecord};
use serde_json::Value;

use crate::platform::{descriptor, FieldDefault};

/// A raw record reduced to its platform's fixed field set.
pub type NormalizedRecord = serde_json::Map<String, Value>;

/// Maps `raw` onto the normalized schema for `platform`.
///
/// Present values are copied unchanged. Absent or `null` fields take the
/// descriptor's default. Never fails.
#[must_use]
pub fn extract(platform: Platform, raw: &RawRecord) -> NormalizedRecord {
    descriptor(platform)
        .fields
        .iter()
        .map(|spec| {
            let value = match raw.get(spec.source) {
                Some(v) if !v.is_null() => v.clone(),
                _ => default_value(spec.default),
            };
            (spec.output.to_string(), value)
        })
        .collect()
}

/// Extracts every usable record, dropping provider error entries.
#[must_use]
pub fn extract_all(platform: Platform, records: &[RawRecord]) -> Vec<NormalizedRecord> {
    records
        .iter()
        .filter(|raw| {
            let error = is_error_record(raw);
            if error {
                tracing::debug!(
                    platform = %platform,
                    error = ?raw.get("error"),
                    "dropping provider error record"
                );
            }
            !error
        })
        .map(|raw| extract(platform, raw))
        .collect()
}

/// With `include_errors=true` the provider returns `{"error": .., "input": ..}`
/// entries for URLs it could not collect.
fn is_error_record(raw: &RawRecord) -> bool {
    let has_error = ["error", "error_code"]
        .iter()
        .any(|key| raw.get(*key).is_some_and(|v| !v.is_null()));
    has_error && raw.get("url").is_none_or(Value::is_null)
}

fn default_value(default: FieldDefault) -> Value {
    match default {
        FieldDefault::Text(text) => Value::String(text.to_string()),
        FieldDefault::Count => Value::String("0".to_string()),
        FieldDefault::Flag => Value::Bool(false),
        FieldDefault::List => Value::Array(Vec::new()),
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
