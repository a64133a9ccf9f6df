//! Blocking HTTP execution via ureq.
//!
//! Status interpretation belongs to the `parse_*` methods, so the agent is
//! configured with `http_status_as_error(false)`: 4xx/5xx responses come back
//! as data and only genuine transport failures become errors. Timeouts and
//! connection pooling are whatever ureq defaults to; the client configures
//! neither.

use tracing::debug;

use crate::error::Error;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Build the agent shared by a `PluginClient`.
pub fn agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

/// Execute an `HttpRequest` and return the response as plain data.
pub fn execute(agent: &ureq::Agent, request: &HttpRequest) -> Result<HttpResponse, Error> {
    debug!(method = ?request.method, url = %request.url, "dispatching admin request");

    let result = match (request.method, request.body.as_deref()) {
        (HttpMethod::Get, _) => agent.get(&request.url).call(),
        (HttpMethod::Delete, _) => agent.delete(&request.url).call(),
        (HttpMethod::Put, Some(body)) => agent
            .put(&request.url)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Put, None) => agent.put(&request.url).send_empty(),
        (HttpMethod::Patch, Some(body)) => agent
            .patch(&request.url)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Patch, None) => agent.patch(&request.url).send_empty(),
    };

    let mut response = result.map_err(|e| Error::Transport(e.to_string()))?;
    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| Error::Transport(e.to_string()))?;

    debug!(status, bytes = body.len(), "admin response received");
    Ok(HttpResponse { status, body })
}
