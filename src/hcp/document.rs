//! JSON:API document helpers
//!
//! Responses are read as `serde_json::Value` trees first so pagination can
//! follow `links.next` without knowing the resource type, then decoded once
//! into typed records.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, TfeError};

/// Get the `links.next` URL of a document, if any
///
/// A missing `links` object, a missing `next` entry and an explicit `null`
/// all mean "last page".
pub fn next_link(document: &Value) -> Option<&str> {
    document
        .get("links")
        .and_then(|links| links.get("next"))
        .and_then(Value::as_str)
        .filter(|next| !next.is_empty())
}

/// Take the `data` member out of a document as a list of items
///
/// A single object is returned as a one-element list, `null` or a missing
/// member as an empty one.
pub fn take_data(document: &mut Value) -> Vec<Value> {
    match document.get_mut("data").map(Value::take) {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => Vec::new(),
        Some(item) => vec![item],
    }
}

/// Decode one JSON:API resource object into a typed record
///
/// Decode failures become `MissingField` errors naming the resource kind
/// and, when present, its id.
pub fn decode_item<T>(item: Value, kind: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let id = item
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string);

    serde_json::from_value(item).map_err(|e| TfeError::MissingField {
        resource: match id {
            Some(id) => format!("{} '{}'", kind, id),
            None => kind.to_string(),
        },
        detail: e.to_string(),
    })
}

/// Decode a list of resource objects, keeping their order
pub fn decode_items<T>(items: Vec<Value>, kind: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    items
        .into_iter()
        .map(|item| decode_item(item, kind))
        .collect()
}
