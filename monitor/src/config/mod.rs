pub mod manager;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
pub use manager::ConfigManager;

use crate::alerts::AlertThresholds;
use crate::constants::{defaults, outage, schedule};
use crate::errors::ConfigError;

/// Fully resolved and validated runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub rpc_urls: Vec<String>,
    pub node_url: String,
    pub thresholds: AlertThresholds,
    pub telegram: TelegramConfig,
    pub state_file: PathBuf,
    pub check_interval_seconds: u64,
    pub rpc_timeout_seconds: u64,
    pub command_poll_interval_seconds: u64,
    pub outage: OutageConfig,
}

#[derive(Clone)]
pub struct TelegramConfig {
    pub api_url: String,
    pub bot_token: String,
    pub chat_id: String,
}

// Keeps the bot token out of logs
impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("api_url", &self.api_url)
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutageConfig {
    pub grace_seconds: u64,
    pub repeat_seconds: u64,
}

impl Default for OutageConfig {
    fn default() -> Self {
        Self {
            grace_seconds: outage::GRACE_SECONDS,
            repeat_seconds: outage::REPEAT_SECONDS,
        }
    }
}

impl Config {
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_seconds)
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_seconds)
    }

    pub fn command_poll_interval(&self) -> Duration {
        Duration::from_secs(self.command_poll_interval_seconds)
    }

    /// Merge the optional config file with environment overrides and validate the result.
    ///
    /// `lookup` returns the raw value of an environment variable. A non-empty
    /// variable always wins over the corresponding file entry.
    pub fn resolve<F>(file: FileConfig, lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let rpc_urls = match env("RPC_URLS") {
            Some(raw) => split_urls(&raw),
            None => file
                .rpc_urls
                .unwrap_or_default()
                .iter()
                .flat_map(|url| split_urls(url))
                .collect(),
        };
        if rpc_urls.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "RPC_URLS".to_string(),
            });
        }

        let node_url = required(env("NODE_URL").or(file.node_url), "NODE_URL")?;
        let node_url = trim_url(&node_url);

        let file_alert = file.alert.unwrap_or_default();
        let thresholds = AlertThresholds::new(
            threshold(env("LEVEL_1"), file_alert.level_1, "LEVEL_1")?,
            threshold(env("LEVEL_2"), file_alert.level_2, "LEVEL_2")?,
            threshold(env("LEVEL_3"), file_alert.level_3, "LEVEL_3")?,
        )?;

        let file_telegram = file.telegram.unwrap_or_default();
        let telegram = TelegramConfig {
            api_url: trim_url(
                &env("TELEGRAM_API_URL")
                    .or(file_telegram.api_url)
                    .unwrap_or_else(|| defaults::TELEGRAM_API_URL.to_string()),
            ),
            bot_token: required(env("BOT_TOKEN").or(file_telegram.bot_token), "BOT_TOKEN")?,
            chat_id: required(env("CHAT_ID").or(file_telegram.chat_id), "CHAT_ID")?,
        };

        let state_file = PathBuf::from(
            env("STATE_FILE")
                .or(file.state_file)
                .unwrap_or_else(|| defaults::STATE_FILE.to_string()),
        );

        let check_interval_seconds = number(
            env("CHECK_INTERVAL_SECONDS"),
            file.check_interval_seconds,
            "CHECK_INTERVAL_SECONDS",
            schedule::CHECK_INTERVAL_SECONDS,
        )?;
        let rpc_timeout_seconds = number(
            env("RPC_TIMEOUT_SECONDS"),
            file.rpc_timeout_seconds,
            "RPC_TIMEOUT_SECONDS",
            schedule::RPC_TIMEOUT_SECONDS,
        )?;
        let command_poll_interval_seconds = number(
            env("COMMAND_POLL_INTERVAL_SECONDS"),
            file.command_poll_interval_seconds,
            "COMMAND_POLL_INTERVAL_SECONDS",
            schedule::COMMAND_POLL_INTERVAL_SECONDS,
        )?;

        let file_outage = file.outage.unwrap_or_default();
        let outage = OutageConfig {
            grace_seconds: number(
                env("OUTAGE_GRACE_SECONDS"),
                file_outage.grace_seconds,
                "OUTAGE_GRACE_SECONDS",
                outage::GRACE_SECONDS,
            )?,
            repeat_seconds: number(
                env("OUTAGE_REPEAT_SECONDS"),
                file_outage.repeat_seconds,
                "OUTAGE_REPEAT_SECONDS",
                outage::REPEAT_SECONDS,
            )?,
        };

        let config = Config {
            rpc_urls,
            node_url,
            thresholds,
            telegram,
            state_file,
            check_interval_seconds,
            rpc_timeout_seconds,
            command_poll_interval_seconds,
            outage,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.check_interval_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "CHECK_INTERVAL_SECONDS".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.command_poll_interval_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "COMMAND_POLL_INTERVAL_SECONDS".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        // A probe must never outlive its cycle
        if self.rpc_timeout_seconds == 0 || self.rpc_timeout_seconds >= self.check_interval_seconds {
            return Err(ConfigError::InvalidValue {
                field: "RPC_TIMEOUT_SECONDS".to_string(),
                reason: format!(
                    "must be between 1 and {} (shorter than the check interval)",
                    self.check_interval_seconds - 1
                ),
            });
        }
        Ok(())
    }
}

/// On-disk TOML layout. Every entry is optional; environment variables fill the gaps.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub rpc_urls: Option<Vec<String>>,
    pub node_url: Option<String>,
    pub state_file: Option<String>,
    pub check_interval_seconds: Option<u64>,
    pub rpc_timeout_seconds: Option<u64>,
    pub command_poll_interval_seconds: Option<u64>,
    pub alert: Option<FileAlertConfig>,
    pub telegram: Option<FileTelegramConfig>,
    pub outage: Option<FileOutageConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileAlertConfig {
    pub level_1: Option<i64>,
    pub level_2: Option<i64>,
    pub level_3: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileTelegramConfig {
    pub api_url: Option<String>,
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileOutageConfig {
    pub grace_seconds: Option<u64>,
    pub repeat_seconds: Option<u64>,
}

fn split_urls(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(trim_url)
        .filter(|url| !url.is_empty())
        .collect()
}

// `<endpoint>/status` is appended later, so a trailing slash would double up
fn trim_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn required(value: Option<String>, field: &str) -> Result<String, ConfigError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::MissingRequired {
            field: field.to_string(),
        })
}

fn parse_value<T: FromStr>(raw: &str, field: &str) -> Result<T, ConfigError>
where
    T::Err: fmt::Display,
{
    raw.parse::<T>().map_err(|e| ConfigError::InvalidValue {
        field: field.to_string(),
        reason: format!("'{}' is not a valid integer: {}", raw, e),
    })
}

fn threshold(env: Option<String>, file: Option<i64>, field: &str) -> Result<i64, ConfigError> {
    match (env, file) {
        (Some(raw), _) => parse_value(&raw, field),
        (None, Some(value)) => Ok(value),
        (None, None) => Err(ConfigError::MissingRequired {
            field: field.to_string(),
        }),
    }
}

fn number(env: Option<String>, file: Option<u64>, field: &str, default: u64) -> Result<u64, ConfigError> {
    match env {
        Some(raw) => parse_value(&raw, field),
        None => Ok(file.unwrap_or(default)),
    }
}
