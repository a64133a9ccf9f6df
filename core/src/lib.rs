//! Synchronous client for a gateway's plugin admin API.
//!
//! # Overview
//! Wraps the gateway's administrative REST interface for plugin resources:
//! create, read, update, delete, list (optionally filtered), the list of
//! enabled plugin types, and per-type configuration schemas.
//!
//! # Design
//! - `PluginClient` is stateless between calls — it holds a `Config` (base
//!   address) and a pooled `ureq::Agent`, nothing else.
//! - Each operation is split into a `build_*` method that produces a plain
//!   `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`,
//!   with the blocking round-trip in between handled by `transport`. The
//!   build/parse halves never touch the network, so the interesting logic
//!   (URL selection, filter encoding, absent-vs-error interpretation) is
//!   testable without a server.
//! - The gateway signals "no such plugin" on a GET with a parsed empty `id`,
//!   not with a status code; the client honors that and returns `Ok(None)`.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod transport;
pub mod types;

pub use client::PluginClient;
pub use config::Config;
pub use error::Error;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{
    Plugin, PluginFilter, PluginRequest, PluginSchema, PluginSchemaField, Plugins,
};
