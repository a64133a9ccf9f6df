//! HTTP requests and responses as plain data.
//!
//! # Design
//! The client's `build_*` methods produce `HttpRequest` values and its
//! `parse_*` methods consume `HttpResponse` values; the network round-trip
//! in between lives in [`crate::transport`]. Keeping both sides as plain
//! data makes URL selection and response interpretation testable without a
//! server, and lets callers substitute their own transport if they need to.

/// HTTP method for a request. Only the four methods the admin API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Put,
    Patch,
    Delete,
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the transport after executing an `HttpRequest`, then
/// handed to a `parse_*` method for interpretation.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}
