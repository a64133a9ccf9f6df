//! Plugin admin operations: request building, dispatch, response parsing.
//!
//! # Design
//! `PluginClient` holds a `Config` and a pooled `ureq::Agent`, nothing else,
//! so it is safe to share across threads. Every operation is split into a
//! `build_*` method producing an `HttpRequest` and a `parse_*` method
//! consuming an `HttpResponse`; the public one-call operations run the two
//! halves through `transport::execute`. The split keeps URL selection and
//! response interpretation testable without a server.
//!
//! Two gateway peculiarities shape the parsing rules:
//! - a GET for a missing plugin can come back `200 {}`, so existence is
//!   judged by the parsed `id`, never by status;
//! - create and update failures arrive as a plugin-shaped body with an empty
//!   `id` and a human-readable payload, reported here as `RemoteRejection`
//!   with the raw body attached.

use serde::Deserialize;

use crate::config::Config;
use crate::error::Error;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query;
use crate::transport;
use crate::types::{Plugin, PluginFilter, PluginRequest, PluginSchema, Plugins};

/// Collection path, trailing slash included — the gateway distinguishes
/// `/plugins` from `/plugins/`.
pub const PLUGINS_PATH: &str = "/plugins/";

/// Synchronous client for the gateway's plugin admin API.
#[derive(Clone)]
pub struct PluginClient {
    config: Config,
    agent: ureq::Agent,
}

impl std::fmt::Debug for PluginClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PluginClient {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            agent: transport::agent(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.config.host_address(), PLUGINS_PATH)
    }

    fn resource_url(&self, id: &str) -> String {
        format!("{}{}{}", self.config.host_address(), PLUGINS_PATH, id)
    }

    // --- get by id ---

    pub fn build_get_by_id(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.resource_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    /// An empty parsed `id` means the plugin does not exist; that is a
    /// successful lookup with no resource, not an error.
    pub fn parse_get_by_id(&self, response: HttpResponse) -> Result<Option<Plugin>, Error> {
        let plugin: Plugin = decode(&response)?;
        if plugin.id.is_empty() {
            return Ok(None);
        }
        Ok(Some(plugin))
    }

    /// Fetch one plugin by id. Returns `Ok(None)` when the gateway reports
    /// no such resource.
    pub fn get_by_id(&self, id: &str) -> Result<Option<Plugin>, Error> {
        let request = self.build_get_by_id(id);
        let response = transport::execute(&self.agent, &request)?;
        self.parse_get_by_id(response)
    }

    // --- create ---

    /// The create endpoint depends on the request: a plugin bound to an API
    /// is PUT to that API's own plugin collection so the gateway records the
    /// binding, everything else goes to the global collection. PUT, not
    /// POST — the gateway upserts by composite key.
    pub fn build_create(&self, request: &PluginRequest) -> Result<HttpRequest, Error> {
        let url = match request.api_id.as_deref() {
            None | Some("") => self.collection_url(),
            Some(api_id) => format!(
                "{}/apis/{}{}",
                self.config.host_address(),
                api_id,
                PLUGINS_PATH
            ),
        };
        let body = serde_json::to_string(request).map_err(|e| Error::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            url,
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Plugin, Error> {
        parse_written(response)
    }

    /// Create (or upsert) a plugin, globally or bound to the API named by
    /// `request.api_id`.
    pub fn create(&self, request: &PluginRequest) -> Result<Plugin, Error> {
        let http_request = self.build_create(request)?;
        let response = transport::execute(&self.agent, &http_request)?;
        self.parse_create(response)
    }

    // --- update by id ---

    /// Unlike create, the URL is derived from `id` alone; any `api_id` in
    /// the payload is left for the gateway to reconcile.
    pub fn build_update_by_id(
        &self,
        id: &str,
        request: &PluginRequest,
    ) -> Result<HttpRequest, Error> {
        let body = serde_json::to_string(request).map_err(|e| Error::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Patch,
            url: self.resource_url(id),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn parse_update_by_id(&self, response: HttpResponse) -> Result<Plugin, Error> {
        parse_written(response)
    }

    /// Patch an existing plugin.
    pub fn update_by_id(&self, id: &str, request: &PluginRequest) -> Result<Plugin, Error> {
        let http_request = self.build_update_by_id(id, request)?;
        let response = transport::execute(&self.agent, &http_request)?;
        self.parse_update_by_id(response)
    }

    // --- delete by id ---

    pub fn build_delete_by_id(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: self.resource_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Success is "the request completed". The gateway answers 204 when the
    /// plugin existed and 404 when it did not; both count as success here.
    pub fn parse_delete_by_id(&self, _response: HttpResponse) -> Result<(), Error> {
        Ok(())
    }

    /// Delete a plugin by id. Deleting an absent plugin is not an error.
    pub fn delete_by_id(&self, id: &str) -> Result<(), Error> {
        let request = self.build_delete_by_id(id);
        let response = transport::execute(&self.agent, &request)?;
        self.parse_delete_by_id(response)
    }

    // --- list ---

    pub fn build_list_filtered(
        &self,
        filter: Option<&PluginFilter>,
    ) -> Result<HttpRequest, Error> {
        let url = query::append(self.collection_url(), filter)?;
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Plugins, Error> {
        decode(&response)
    }

    /// List one page of plugins matching `filter`. The envelope's `next`
    /// token is returned verbatim; pagination is the caller's business.
    pub fn list_filtered(&self, filter: Option<&PluginFilter>) -> Result<Plugins, Error> {
        let request = self.build_list_filtered(filter)?;
        let response = transport::execute(&self.agent, &request)?;
        self.parse_list(response)
    }

    /// List one page of plugins, unfiltered.
    pub fn list(&self) -> Result<Plugins, Error> {
        self.list_filtered(None)
    }

    // --- enabled plugin types ---

    pub fn build_list_enabled(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}enabled", self.collection_url()),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_enabled(&self, response: HttpResponse) -> Result<Vec<String>, Error> {
        #[derive(Deserialize)]
        struct EnabledPlugins {
            #[serde(default)]
            enabled_plugins: Vec<String>,
        }
        let enabled: EnabledPlugins = decode(&response)?;
        Ok(enabled.enabled_plugins)
    }

    /// Names of the plugin types the gateway has enabled, in server order.
    pub fn list_enabled(&self) -> Result<Vec<String>, Error> {
        let request = self.build_list_enabled();
        let response = transport::execute(&self.agent, &request)?;
        self.parse_list_enabled(response)
    }

    // --- schema introspection ---

    pub fn build_get_schema(&self, plugin_name: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}schema/{}", self.collection_url(), plugin_name),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Success and failure responses share the schema shape; the body is
    /// decoded first, then the status decides. Non-200 surfaces the server's
    /// `message`; on 200 the `fields` map is authoritative and `message` is
    /// ignored.
    pub fn parse_get_schema(&self, response: HttpResponse) -> Result<PluginSchema, Error> {
        let schema: PluginSchema = decode(&response)?;
        if response.status != 200 {
            return Err(Error::RemoteRejection {
                body: schema.message.unwrap_or_default(),
            });
        }
        Ok(schema)
    }

    /// Fetch the configuration schema of the plugin type `plugin_name`.
    pub fn get_schema(&self, plugin_name: &str) -> Result<PluginSchema, Error> {
        let request = self.build_get_schema(plugin_name);
        let response = transport::execute(&self.agent, &request)?;
        self.parse_get_schema(response)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn decode<T: serde::de::DeserializeOwned>(response: &HttpResponse) -> Result<T, Error> {
    serde_json::from_str(&response.body).map_err(|e| Error::Decode {
        reason: e.to_string(),
        body: response.body.clone(),
    })
}

/// Shared tail of create/update parsing: a plugin-shaped body with an empty
/// `id` is the gateway's way of rejecting the write.
fn parse_written(response: HttpResponse) -> Result<Plugin, Error> {
    let plugin: Plugin = decode(&response)?;
    if plugin.id.is_empty() {
        return Err(Error::RemoteRejection {
            body: response.body,
        });
    }
    Ok(plugin)
}
