//! Mock RPC server for testing height probes
//!
//! This simulates a CometBFT `/status` endpoint without requiring a real node.

use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Mock RPC server that simulates blockchain node responses
pub struct MockRpcServer {
    pub server: MockServer,
    pub base_url: String,
}

pub fn status_body(latest_block_height: &str) -> serde_json::Value {
    json!({
        "jsonrpc": "2.0",
        "id": -1,
        "result": {
            "node_info": {
                "network": "pirin-1",
                "moniker": "test-node"
            },
            "sync_info": {
                "latest_block_height": latest_block_height,
                "catching_up": false
            }
        }
    })
}

impl MockRpcServer {
    /// Create a new mock RPC server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    /// Start a server that already reports `height`
    pub async fn with_height(height: u64) -> Self {
        let rpc = Self::start().await;
        rpc.mock_height(height).await;
        rpc
    }

    /// Start a server that answers every status request with HTTP 500
    pub async fn failing() -> Self {
        let rpc = Self::start().await;
        rpc.mock_status_code(500).await;
        rpc
    }

    /// Mock healthy node at the given height
    pub async fn mock_height(&self, height: u64) {
        Mock::given(method("GET"))
            .and(path("/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(status_body(&height.to_string())))
            .mount(&self.server)
            .await;
    }

    /// Mock a node that answers only after `delay`
    pub async fn mock_slow_height(&self, height: u64, delay: Duration) {
        Mock::given(method("GET"))
            .and(path("/status"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(status_body(&height.to_string()))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock a non-success status
    pub async fn mock_status_code(&self, status_code: u16) {
        Mock::given(method("GET"))
            .and(path("/status"))
            .respond_with(ResponseTemplate::new(status_code).set_body_string("node unavailable"))
            .mount(&self.server)
            .await;
    }

    /// Mock a height that is not an integer
    pub async fn mock_invalid_height(&self, raw: &str) {
        Mock::given(method("GET"))
            .and(path("/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(status_body(raw)))
            .mount(&self.server)
            .await;
    }

    /// Mock a body that is not the status schema
    pub async fn mock_raw_body(&self, body: &str) {
        Mock::given(method("GET"))
            .and(path("/status"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Mock a JSON-RPC error response
    pub async fn mock_rpc_error(&self, message: &str) {
        Mock::given(method("GET"))
            .and(path("/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": -1,
                "error": { "code": -32603, "message": message }
            })))
            .mount(&self.server)
            .await;
    }

    /// Drop all mounted mocks
    pub async fn reset(&self) {
        self.server.reset().await;
    }
}
