//! Schema constraint and parsing for the writer stage's
//! [`PlatformReport`](crate::types::PlatformReport).
//!
//! The schema is sent with every writer request. Replies are still parsed
//! locally: reasoning models wrap the JSON in `<think>` blocks or code fences.

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::SummarizerError;

/// Report types the writer stage can be constrained to.
///
/// Every object in the schema is closed and lists all its properties as
/// required, so a report missing `bullet_points` or carrying extra keys is
/// rejected by the provider instead of reaching the caller. Nested types are
/// inlined since the providers do not resolve `$ref`.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    fn strict_schema() -> Value {
        let mut value = serde_json::to_value(schema_for!(Self)).unwrap_or_default();

        close_objects(&mut value);
        inline_refs(&mut value);

        if let Value::Object(map) = &mut value {
            map.remove("definitions");
            map.remove("$schema");
        }
        value
    }
}

impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

/// `response_format` body for a `json_schema` constrained completion.
pub(crate) fn response_format<T: StructuredOutput>(name: &str) -> Value {
    serde_json::json!({
        "type": "json_schema",
        "json_schema": {
            "name": name,
            "strict": true,
            "schema": T::strict_schema(),
        }
    })
}

/// Parses the writer output, tolerating reasoning blocks and code fences
/// around the JSON.
pub(crate) fn parse_structured<T: StructuredOutput>(text: &str) -> Result<T, SummarizerError> {
    let body = strip_code_fence(strip_reasoning(text));
    serde_json::from_str(body).map_err(|source| SummarizerError::SchemaValidation { source })
}

/// Drops a leading `<think>…</think>` block emitted by reasoning models.
pub(crate) fn strip_reasoning(text: &str) -> &str {
    match text.rfind("</think>") {
        Some(end) => text[end + "</think>".len()..].trim(),
        None => text.trim(),
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

fn close_objects(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if map.get("type") == Some(&Value::String("object".to_string())) {
                map.insert("additionalProperties".to_string(), Value::Bool(false));

                if let Some(Value::Object(props)) = map.get("properties") {
                    let all_keys: Vec<Value> =
                        props.keys().map(|k| Value::String(k.clone())).collect();
                    map.insert("required".to_string(), Value::Array(all_keys));
                }
            }
            for (_, v) in map.iter_mut() {
                close_objects(v);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                close_objects(item);
            }
        }
        _ => {}
    }
}

fn inline_refs(value: &mut Value) {
    let definitions = match value {
        Value::Object(map) => map.get("definitions").cloned(),
        _ => None,
    };
    if let Some(defs) = definitions {
        inline_refs_with(value, &defs);
    }
}

fn inline_refs_with(value: &mut Value, definitions: &Value) {
    match value {
        Value::Object(map) => {
            // A `$ref` into definitions, or a single-element `allOf` wrapper.
            let replacement = map
                .get("$ref")
                .and_then(Value::as_str)
                .and_then(|path| path.strip_prefix("#/definitions/"))
                .and_then(|name| definitions.get(name))
                .or_else(|| match map.get("allOf") {
                    Some(Value::Array(all_of)) if all_of.len() == 1 => all_of.first(),
                    _ => None,
                })
                .cloned();

            if let Some(replacement) = replacement {
                *value = replacement;
                inline_refs_with(value, definitions);
                return;
            }

            for (_, v) in map.iter_mut() {
                inline_refs_with(v, definitions);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                inline_refs_with(item, definitions);
            }
        }
        _ => {}
    }
}
