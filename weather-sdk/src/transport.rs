//! The seam between the dispatcher and the network.
//!
//! [`HttpTransport`] performs real requests; tests substitute their own
//! [`Transport`] to script status codes and bodies.

use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod http;

pub use http::HttpTransport;

/// A fully-resolved GET request: URL, query string and headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub url: String,
    pub query: Vec<(&'static str, String)>,
    pub headers: Vec<(&'static str, &'static str)>,
}

impl OutboundRequest {
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Whatever the server answered, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// The request never produced an HTTP response (DNS, connect, timeout, ...).
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[async_trait]
pub trait Transport: Send + Sync + Debug {
    async fn execute(&self, request: &OutboundRequest) -> Result<RawResponse, TransportError>;
}
