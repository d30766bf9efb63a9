//! Test configuration builder for creating configs programmatically

use std::collections::HashMap;
use std::path::Path;

use monitor::config::{Config, FileConfig};

use super::test_data::{telegram, thresholds, timing};

/// Builder that feeds variables through the same resolution path as the binary
pub struct TestConfigBuilder {
    vars: HashMap<String, String>,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        let mut vars = HashMap::new();
        vars.insert("LEVEL_1".to_string(), thresholds::LEVEL_1.to_string());
        vars.insert("LEVEL_2".to_string(), thresholds::LEVEL_2.to_string());
        vars.insert("LEVEL_3".to_string(), thresholds::LEVEL_3.to_string());
        vars.insert("BOT_TOKEN".to_string(), telegram::BOT_TOKEN.to_string());
        vars.insert("CHAT_ID".to_string(), telegram::CHAT_ID.to_string());
        vars.insert(
            "CHECK_INTERVAL_SECONDS".to_string(),
            timing::CHECK_INTERVAL.to_string(),
        );
        vars.insert("RPC_TIMEOUT_SECONDS".to_string(), timing::RPC_TIMEOUT.to_string());
        vars.insert("OUTAGE_GRACE_SECONDS".to_string(), timing::OUTAGE_GRACE.to_string());
        vars.insert("OUTAGE_REPEAT_SECONDS".to_string(), timing::OUTAGE_REPEAT.to_string());
        Self { vars }
    }

    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_peers(self, urls: &[&str]) -> Self {
        let joined = urls.join(",");
        self.with_var("RPC_URLS", &joined)
    }

    pub fn with_node(self, url: &str) -> Self {
        self.with_var("NODE_URL", url)
    }

    pub fn with_telegram(self, api_url: &str) -> Self {
        self.with_var("TELEGRAM_API_URL", api_url)
    }

    pub fn with_state_file(self, path: &Path) -> Self {
        let path = path.display().to_string();
        self.with_var("STATE_FILE", &path)
    }

    pub fn with_thresholds(self, level_1: i64, level_2: i64, level_3: i64) -> Self {
        self.with_var("LEVEL_1", &level_1.to_string())
            .with_var("LEVEL_2", &level_2.to_string())
            .with_var("LEVEL_3", &level_3.to_string())
    }

    pub fn vars(&self) -> &HashMap<String, String> {
        &self.vars
    }

    pub fn build(self) -> Config {
        let vars = self.vars;
        Config::resolve(FileConfig::default(), |name| vars.get(name).cloned())
            .expect("Test configuration should be valid")
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
