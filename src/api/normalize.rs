use crate::models::Property;
use serde_json::Value;
use tracing::warn;

/// Pull the record array out of a list response.
///
/// Accepts a bare array, a page envelope (`content`) or a hypermedia
/// envelope (`_embedded.properties`). Anything else yields no records.
pub fn normalize_list(resp: &Value) -> &[Value] {
    if let Some(items) = resp.as_array() {
        return items;
    }
    if let Some(items) = resp.get("content").and_then(Value::as_array) {
        return items;
    }
    if let Some(items) = resp
        .get("_embedded")
        .and_then(|e| e.get("properties"))
        .and_then(Value::as_array)
    {
        return items;
    }
    &[]
}

/// Decode normalized items into records, dropping the ones that don't fit.
pub fn decode_records(items: &[Value]) -> Vec<Property> {
    items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| match serde_json::from_value(item.clone()) {
            Ok(property) => Some(property),
            Err(e) => {
                warn!(index = idx, error = %e, "Skipping malformed property record");
                None
            }
        })
        .collect()
}
