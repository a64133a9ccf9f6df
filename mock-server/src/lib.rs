//! In-memory stub of a gateway's plugin admin API, used by the core crate's
//! integration tests and runnable standalone.
//!
//! Reproduces the wire behaviors the client has to cope with, including the
//! awkward ones: GET of an unknown plugin answers `200 {}` rather than 404,
//! create rejections come back as JSON with a `message` and no `id`, and
//! PUT to a collection upserts by (name, api_id, consumer_id).

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Plugin types this stub reports as enabled, in a fixed order.
pub const ENABLED_PLUGINS: &[&str] = &[
    "basic-auth",
    "cors",
    "key-auth",
    "rate-limiting",
    "request-transformer",
];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Plugin {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<HashMap<String, Value>>,
    pub enabled: bool,
}

#[derive(Deserialize)]
pub struct PluginRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub api_id: Option<String>,
    #[serde(default)]
    pub consumer_id: Option<String>,
    #[serde(default)]
    pub config: Option<HashMap<String, Value>>,
}

#[derive(Deserialize)]
struct UpdatePlugin {
    name: Option<String>,
    api_id: Option<String>,
    consumer_id: Option<String>,
    config: Option<HashMap<String, Value>>,
    enabled: Option<bool>,
}

#[derive(Deserialize, Default)]
pub struct ListFilter {
    pub id: Option<String>,
    pub name: Option<String>,
    pub api_id: Option<String>,
    pub consumer_id: Option<String>,
    pub size: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Serialize)]
struct Page {
    data: Vec<Plugin>,
    total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    next: Option<String>,
}

pub type Db = Arc<RwLock<HashMap<String, Plugin>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/plugins/", get(list_plugins).put(create_plugin))
        .route("/plugins/enabled", get(list_enabled))
        .route("/plugins/schema/{name}", get(get_schema))
        .route(
            "/plugins/{id}",
            get(get_plugin).patch(update_plugin).delete(delete_plugin),
        )
        .route("/apis/{api_id}/plugins/", put(create_api_plugin))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn get_plugin(State(db): State<Db>, Path(id): Path<String>) -> Response {
    let plugins = db.read().await;
    match plugins.get(&id) {
        Some(plugin) => Json(plugin.clone()).into_response(),
        // Gateway quirk under test: missing plugins answer 200 with an
        // empty object, not 404.
        None => Json(json!({})).into_response(),
    }
}

async fn list_plugins(State(db): State<Db>, Query(filter): Query<ListFilter>) -> Json<Page> {
    let plugins = db.read().await;
    let mut matched: Vec<Plugin> = plugins
        .values()
        .filter(|p| {
            filter.id.as_ref().is_none_or(|id| &p.id == id)
                && filter.name.as_ref().is_none_or(|name| &p.name == name)
                && filter.api_id.as_ref().is_none_or(|a| p.api_id.as_ref() == Some(a))
                && filter
                    .consumer_id
                    .as_ref()
                    .is_none_or(|c| p.consumer_id.as_ref() == Some(c))
        })
        .cloned()
        .collect();
    matched.sort_by(|a, b| a.id.cmp(&b.id));

    let total = matched.len();
    let offset = filter.offset.unwrap_or(0);
    let size = filter.size.unwrap_or(100);
    let data: Vec<Plugin> = matched.into_iter().skip(offset).take(size).collect();
    let next = if offset + size < total {
        Some(format!("/plugins/?offset={}", offset + size))
    } else {
        None
    };

    Json(Page { data, total, next })
}

async fn create_plugin(State(db): State<Db>, Json(input): Json<PluginRequest>) -> Response {
    upsert(&db, input).await
}

async fn create_api_plugin(
    State(db): State<Db>,
    Path(api_id): Path<String>,
    Json(mut input): Json<PluginRequest>,
) -> Response {
    input.api_id = Some(api_id);
    upsert(&db, input).await
}

/// PUT semantics: replace the plugin with the same (name, api_id,
/// consumer_id) key if one exists, create it otherwise.
async fn upsert(db: &Db, input: PluginRequest) -> Response {
    if input.name.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "name required"})),
        )
            .into_response();
    }

    let mut plugins = db.write().await;
    let id = plugins
        .values()
        .find(|p| {
            p.name == input.name && p.api_id == input.api_id && p.consumer_id == input.consumer_id
        })
        .map(|p| p.id.clone())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let plugin = Plugin {
        id: id.clone(),
        name: input.name,
        api_id: input.api_id,
        consumer_id: input.consumer_id,
        config: input.config,
        enabled: true,
    };
    plugins.insert(id, plugin.clone());
    (StatusCode::CREATED, Json(plugin)).into_response()
}

async fn update_plugin(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdatePlugin>,
) -> Response {
    let mut plugins = db.write().await;
    let Some(plugin) = plugins.get_mut(&id) else {
        return (StatusCode::NOT_FOUND, Json(json!({"message": "Not found"}))).into_response();
    };
    if let Some(name) = input.name {
        plugin.name = name;
    }
    if let Some(api_id) = input.api_id {
        plugin.api_id = Some(api_id);
    }
    if let Some(consumer_id) = input.consumer_id {
        plugin.consumer_id = Some(consumer_id);
    }
    if let Some(config) = input.config {
        plugin.config = Some(config);
    }
    if let Some(enabled) = input.enabled {
        plugin.enabled = enabled;
    }
    Json(plugin.clone()).into_response()
}

async fn delete_plugin(State(db): State<Db>, Path(id): Path<String>) -> Response {
    let mut plugins = db.write().await;
    match plugins.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"message": "Not found"}))).into_response(),
    }
}

async fn list_enabled() -> Json<Value> {
    Json(json!({ "enabled_plugins": ENABLED_PLUGINS }))
}

async fn get_schema(Path(name): Path<String>) -> Response {
    match schema_for(&name) {
        Some(schema) => Json(schema).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": format!("No plugin named '{name}'")})),
        )
            .into_response(),
    }
}

/// Canned configuration schemas for a few well-known plugin types.
fn schema_for(name: &str) -> Option<Value> {
    let schema = match name {
        "cors" => json!({"fields": {
            "origins": {"type": "string"},
            "methods": {"type": "string", "default": "GET,HEAD,PUT,PATCH,POST,DELETE"},
            "credentials": {"type": "boolean", "default": false},
            "max_age": {"type": "number"}
        }}),
        "rate-limiting" => json!({"fields": {
            "minute": {"type": "number", "default": 5},
            "hour": {"type": "number"},
            "limit_by": {"type": "string", "default": "consumer"},
            "policy": {"type": "string", "default": "cluster", "func": "check_policy"}
        }}),
        "key-auth" => json!({"fields": {
            "key_names": {"type": "array", "required": true, "default": ["apikey"]},
            "hide_credentials": {"type": "boolean", "default": false}
        }}),
        _ => return None,
    };
    Some(schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_serializes_without_unset_optionals() {
        let plugin = Plugin {
            id: "p-1".to_string(),
            name: "cors".to_string(),
            api_id: None,
            consumer_id: None,
            config: None,
            enabled: true,
        };
        let value = serde_json::to_value(&plugin).unwrap();
        assert_eq!(value, json!({"id": "p-1", "name": "cors", "enabled": true}));
    }

    #[test]
    fn plugin_request_tolerates_missing_name() {
        let input: PluginRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(input.name, "");
        assert!(input.api_id.is_none());
    }

    #[test]
    fn known_schema_has_fields() {
        let schema = schema_for("rate-limiting").unwrap();
        assert_eq!(schema["fields"]["minute"]["default"], 5);
    }

    #[test]
    fn unknown_schema_is_none() {
        assert!(schema_for("no-such-plugin").is_none());
    }
}
