//! Legacy media-URL normalization.
//!
//! The `media_url` column predates multi-attachment submissions and has
//! carried three shapes over time: a single URL string, a JSON array,
//! and a JSON-encoded array stored as a string. Everything funnels
//! through [`parse_media_urls`] so the rest of the system only sees
//! `Vec<String>`.

use serde_json::Value;

/// Normalizes a persisted `media_url` value into a list of URLs.
pub fn parse_media_urls(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_owned))
            .collect(),
        Value::String(raw) => {
            let raw = raw.trim();
            if raw.is_empty() {
                return Vec::new();
            }
            if raw.starts_with('[') {
                if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(raw) {
                    return items
                        .iter()
                        .filter_map(|item| item.as_str().map(str::to_owned))
                        .collect();
                }
                // Unparseable bracketed string is treated as one URL.
                return vec![raw.to_owned()];
            }
            vec![raw.to_owned()]
        }
        _ => Vec::new(),
    }
}
