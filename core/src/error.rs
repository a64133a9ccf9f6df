//! Error types for the plugin admin client.
//!
//! # Design
//! The gateway frequently answers a failed create or update with HTTP 200 and
//! a human-readable JSON error payload, so status codes alone cannot classify
//! failures. `RemoteRejection` carries the raw server body for that case;
//! `Decode` keeps the body too, since a shape mismatch is easiest to debug
//! with the offending payload in hand.

use std::fmt;

/// Errors returned by `PluginClient` operations.
#[derive(Debug)]
pub enum Error {
    /// The HTTP request did not complete (DNS, connection, I/O).
    Transport(String),

    /// The response body was not valid JSON or did not match the expected
    /// shape. `body` is the raw server response.
    Decode { reason: String, body: String },

    /// The server rejected the operation: an empty `id` after create/update,
    /// or a non-200 status from schema introspection. `body` is the raw
    /// response body (or the server's `message` for schema lookups).
    RemoteRejection { body: String },

    /// The filter record could not be serialized into a query string.
    QueryEncode(String),

    /// The request payload could not be serialized to JSON.
    Encode(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(msg) => write!(f, "request failed: {msg}"),
            Error::Decode { reason, body } => {
                write!(f, "could not parse response: {reason}, gateway response: {body}")
            }
            Error::RemoteRejection { body } => {
                write!(f, "gateway rejected the operation: {body}")
            }
            Error::QueryEncode(msg) => {
                write!(f, "could not build query string for filter: {msg}")
            }
            Error::Encode(msg) => write!(f, "could not serialize request payload: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
