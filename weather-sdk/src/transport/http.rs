use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{OutboundRequest, RawResponse, Transport, TransportError};

/// [`Transport`] backed by `reqwest`.
///
/// Idle connections are not kept between calls, so nothing outlives a request.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = Client::builder().pool_max_idle_per_host(0);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| TransportError::new(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &OutboundRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self.http.get(&request.url).query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(*name, *value);
        }

        let res = builder.send().await.map_err(|e| {
            TransportError::new(format!("Failed to send request to {}: {e}", request.url))
        })?;

        let status = res.status().as_u16();
        let body = res
            .text()
            .await
            .map_err(|e| TransportError::new(format!("Failed to read response body: {e}")))?;

        debug!(url = %request.url, status, bytes = body.len(), "received response");

        Ok(RawResponse { status, body })
    }
}
