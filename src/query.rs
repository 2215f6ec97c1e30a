//! Query-string construction.
//!
//! Endpoint options are plain structs deriving `Serialize`. They are
//! flattened into a string map with [`to_query_map`] and rendered with
//! [`encode_query`], which trims and percent-encodes every key and value.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::{GitHubError, Result};

/// Render `pairs` as `k=v&k=v`.
///
/// Keys and values are trimmed, then percent-encoded. Pair order follows the
/// iterator, so a `HashMap` yields no particular order. No pairs yields an
/// empty string.
pub fn encode_query<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .into_iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key.as_ref().trim()),
                urlencoding::encode(value.as_ref().trim())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Flatten a serializable options struct into query pairs.
///
/// `None` fields are dropped, sequences are joined with `,` and scalars are
/// rendered as text.
pub fn to_query_map<T: Serialize + ?Sized>(options: &T) -> Result<BTreeMap<String, String>> {
    let mut pairs = BTreeMap::new();
    match serde_json::to_value(options)? {
        Value::Null => {}
        Value::Object(map) => {
            for (key, value) in map {
                if let Some(rendered) = render(value) {
                    pairs.insert(key, rendered);
                }
            }
        }
        other => {
            return Err(GitHubError::Validation(format!(
                "query options must be a struct or map, got {other}"
            )))
        }
    }
    Ok(pairs)
}

/// Append the encoded `options` to `path`, if there are any.
pub fn with_query<T: Serialize + ?Sized>(path: &str, options: &T) -> Result<String> {
    Ok(join_query(path, to_query_map(options)?))
}

/// Append encoded `pairs` to `path`, choosing `?` or `&` as the separator.
pub fn join_query<I, K, V>(path: &str, pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let query = encode_query(pairs);
    if query.is_empty() {
        path.to_string()
    } else if path.contains('?') {
        format!("{path}&{query}")
    } else {
        format!("{path}?{query}")
    }
}

fn render(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.into_iter().filter_map(render).collect();
            Some(parts.join(","))
        }
        object @ Value::Object(_) => Some(object.to_string()),
    }
}
