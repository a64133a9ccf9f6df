//! Wire types for the plugin admin API.
//!
//! # Design
//! The gateway signals "not found" on some endpoints with HTTP 200 and an
//! empty JSON object, so `Plugin` must deserialize from `{}`: every field
//! carries a serde default and an empty `id` means "no resource". Optional
//! fields are omitted when unset on the way out, matching the gateway's own
//! serialization.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A plugin instance as stored by the gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plugin {
    /// Server-assigned identifier. Empty on the wire when the resource is
    /// absent.
    #[serde(default)]
    pub id: String,
    /// Plugin-type identifier, e.g. `"rate-limiting"`.
    #[serde(default)]
    pub name: String,
    /// Set when the plugin is bound to a single API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_id: Option<String>,
    /// Set when the plugin is bound to a single consumer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer_id: Option<String>,
    /// Plugin-type-specific options, an arbitrary JSON object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<HashMap<String, Value>>,
    #[serde(default)]
    pub enabled: bool,
}

/// Payload for creating or updating a plugin.
///
/// `api_id` does double duty: it names the API to bind to AND routes the
/// create to the api-scoped endpoint (see `PluginClient::build_create`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<HashMap<String, Value>>,
}

/// One page of a plugin listing. `next` is an opaque continuation URL; the
/// client does not follow it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plugins {
    #[serde(default)]
    pub data: Vec<Plugin>,
    #[serde(default)]
    pub total: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// Filter for plugin listings. `None` fields are left out of the query
/// string entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PluginFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl PluginFilter {
    /// True when no field is set; such a filter produces no query string.
    pub fn is_empty(&self) -> bool {
        *self == PluginFilter::default()
    }
}

/// Configuration schema of a plugin type. On introspection failures the
/// gateway reuses this shape with only `message` populated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginSchema {
    #[serde(default)]
    pub fields: HashMap<String, PluginSchemaField>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One field of a plugin-type configuration schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginSchemaField {
    /// Type of the field's value.
    #[serde(rename = "type", default)]
    pub field_type: String,
    /// The field must be present in a plugin configuration.
    #[serde(default)]
    pub required: bool,
    /// The field's value must be unique across plugin instances.
    #[serde(default)]
    pub unique: bool,
    /// Value applied when the field is omitted from a configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Name of a server-side custom validator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub func: Option<String>,
}

impl PluginSchemaField {
    /// Whether the schema declares a default for this field. A JSON `null`
    /// default counts as no default.
    pub fn has_default_value(&self) -> bool {
        self.default.as_ref().is_some_and(|v| !v.is_null())
    }
}
