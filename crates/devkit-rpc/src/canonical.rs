//! Canonical JSON encoding of request params.
//!
//! Object keys are sorted at every depth and no whitespace is emitted, so two
//! requests whose params differ only in key order or formatting produce the
//! same override key. Keys are rebuilt in sorted order rather than relying on
//! the map type, which keeps the output stable even when `serde_json` is built
//! with `preserve_order`.

use serde_json::{Map, Value};

/// Encode `params` as compact JSON with sorted object keys.
pub fn canonical_params(params: &Value) -> String {
    sort_keys(params).to_string()
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            let mut sorted = Map::with_capacity(entries.len());
            for (key, inner) in entries {
                sorted.insert(key.clone(), sort_keys(inner));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}
