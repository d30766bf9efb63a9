//! Mock bot API server for testing notification delivery
//!
//! Records every request so tests can inspect what was sent.

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use super::test_data::telegram::BOT_TOKEN;

/// Mock bot API that captures sendMessage requests
pub struct MockTelegramServer {
    pub server: MockServer,
    pub base_url: String,
}

impl MockTelegramServer {
    /// Create a new mock server with nothing mounted
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    /// Create a server that accepts every message
    pub async fn accepting() -> Self {
        let telegram = Self::start().await;
        telegram.mock_send_success().await;
        telegram
    }

    fn method_path(method_name: &str) -> String {
        format!("/bot{}/{}", BOT_TOKEN, method_name)
    }

    /// Mock successful delivery
    pub async fn mock_send_success(&self) {
        Mock::given(method("POST"))
            .and(path(Self::method_path("sendMessage")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .mount(&self.server)
            .await;
    }

    /// Mock delivery failure
    pub async fn mock_send_failure(&self, status_code: u16) {
        Mock::given(method("POST"))
            .and(path(Self::method_path("sendMessage")))
            .respond_with(ResponseTemplate::new(status_code).set_body_json(json!({
                "ok": false,
                "description": "Bad Request: chat not found"
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock getUpdates with the given updates
    pub async fn mock_updates(&self, updates: Value) {
        Mock::given(method("GET"))
            .and(path(Self::method_path("getUpdates")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": updates
            })))
            .mount(&self.server)
            .await;
    }

    /// Drop all mounted mocks and recorded requests
    pub async fn reset(&self) {
        self.server.reset().await;
    }

    /// Bodies of every sendMessage request received
    pub async fn sent_messages(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|req| req.url.path().ends_with("/sendMessage"))
            .filter_map(|req| req.body_json::<Value>().ok())
            .collect()
    }

    /// Texts of every sendMessage request received
    pub async fn sent_texts(&self) -> Vec<String> {
        self.sent_messages()
            .await
            .iter()
            .filter_map(|body| body.get("text").and_then(|v| v.as_str()).map(str::to_string))
            .collect()
    }

    /// Query strings of every getUpdates request received
    pub async fn update_queries(&self) -> Vec<Option<String>> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|req| req.url.path().ends_with("/getUpdates"))
            .map(|req| req.url.query().map(str::to_string))
            .collect()
    }
}
