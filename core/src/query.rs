//! Query-string encoding for listing filters.
//!
//! The filter is first serialized through serde so the "unset fields are
//! omitted" rule lives in one place (the `PluginFilter` serde attributes),
//! then the remaining fields are percent-encoded pairwise. Pair order follows
//! the serialized map and is deterministic for a given build.

use serde_json::Value;

use crate::error::Error;
use crate::types::PluginFilter;

/// Encode the set fields of `filter` as a query string, without leading `?`.
/// An all-unset filter encodes to the empty string.
pub fn encode(filter: &PluginFilter) -> Result<String, Error> {
    let value = serde_json::to_value(filter).map_err(|e| Error::QueryEncode(e.to_string()))?;
    let Value::Object(fields) = value else {
        return Err(Error::QueryEncode(
            "filter did not serialize to an object".to_string(),
        ));
    };

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, value) in &fields {
        match value {
            Value::String(s) => {
                serializer.append_pair(name, s);
            }
            Value::Number(n) => {
                serializer.append_pair(name, &n.to_string());
            }
            other => {
                return Err(Error::QueryEncode(format!(
                    "filter field `{name}` has unsupported value {other}"
                )));
            }
        }
    }
    Ok(serializer.finish())
}

/// Append the filter's query string to `url`. `None` and all-unset filters
/// leave the URL untouched (no trailing `?`).
pub fn append(url: String, filter: Option<&PluginFilter>) -> Result<String, Error> {
    match filter {
        None => Ok(url),
        Some(filter) => {
            let query = encode(filter)?;
            if query.is_empty() {
                Ok(url)
            } else {
                Ok(format!("{url}?{query}"))
            }
        }
    }
}
