//! HTTP probe layer.
//!
//! One probe is one GET plus a JSON decode. The probe reports what came back
//! and leaves the business meaning of the payload to the checks.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::SmokeConfig;
use crate::error::SmokeResult;
use crate::payload::{Payload, Shape};

/// Status code and decoded body of a successful round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResponse {
    /// HTTP status code
    pub status: u16,
    /// Body decoded as the requested shape
    pub payload: Payload,
}

/// A probe that did not produce a decodable response.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProbeError {
    /// Connection refused, DNS failure, timeout, or body read failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The node answered but the body is not JSON of the expected shape.
    #[error("status {status}: cannot decode {shape} payload: {reason}; body: {body}")]
    Decode {
        status: u16,
        shape: Shape,
        reason: String,
        body: String,
    },
}

/// Read-only access to a node's RPC surface.
#[async_trait]
pub trait NodeRpc: Send + Sync {
    /// GET `path` and decode the body as `shape`.
    async fn probe(&self, path: &str, shape: Shape) -> Result<ProbeResponse, ProbeError>;
}

/// reqwest-backed [`NodeRpc`].
pub struct RpcClient {
    client: Client,
    config: SmokeConfig,
}

impl RpcClient {
    /// Create a client for the node described by `config`.
    pub fn new(config: SmokeConfig) -> SmokeResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self { client, config })
    }

    /// Configuration this client was built with.
    pub fn config(&self) -> &SmokeConfig {
        &self.config
    }
}

#[async_trait]
impl NodeRpc for RpcClient {
    #[instrument(skip(self), level = "debug")]
    async fn probe(&self, path: &str, shape: Shape) -> Result<ProbeResponse, ProbeError> {
        let url = self.config.url_for(path);
        debug!(
            path,
            authenticated = self.config.auth_token().is_some(),
            "GET"
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProbeError::Transport(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ProbeError::Transport(e.without_url().to_string()))?;

        debug!(status, bytes = body.len(), "response received");

        let payload = Payload::decode(shape, &body).map_err(|reason| ProbeError::Decode {
            status,
            shape,
            reason,
            body,
        })?;

        Ok(ProbeResponse { status, payload })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_client_creation() {
        let config = SmokeConfig::new("http://localhost:8732/", "main")
            .unwrap()
            .with_timeout(Duration::from_secs(5));
        let client = RpcClient::new(config).unwrap();
        assert_eq!(client.config().base_url(), "http://localhost:8732");
    }

    #[tokio::test]
    async fn test_unreachable_node_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = SmokeConfig::new(&format!("http://127.0.0.1:{}", port), "main")
            .unwrap()
            .with_auth_token(Some("s3cret".into()));
        let client = RpcClient::new(config).unwrap();

        let result = client.probe("/network/self", Shape::Text).await;
        match result {
            Err(ProbeError::Transport(message)) => assert!(!message.contains("s3cret")),
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_error_carries_status_and_body() {
        let err = ProbeError::Decode {
            status: 500,
            shape: Shape::Object,
            reason: "expected value at line 1 column 1".into(),
            body: "Internal error".into(),
        };
        let text = err.to_string();
        assert!(text.contains("status 500"));
        assert!(text.contains("Internal error"));
    }
}
