use super::{Config, FileConfig};
use crate::errors::ConfigError;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

pub struct ConfigManager {
    current_config: Arc<Config>,
}

impl ConfigManager {
    /// Load `config_path` (if present) and overlay the process environment
    pub async fn new(config_path: &str) -> Result<Self, ConfigError> {
        let file_config = Self::load_file(config_path).await?;
        let config = Config::resolve(file_config, |name| std::env::var(name).ok())?;

        info!(
            "Loaded configuration: {} RPC endpoints, node {}, thresholds {}/{}/{}, {}s interval",
            config.rpc_urls.len(),
            config.node_url,
            config.thresholds.level_1(),
            config.thresholds.level_2(),
            config.thresholds.level_3(),
            config.check_interval_seconds
        );

        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    /// Copy a dotenv file into the process environment. Variables that are already
    /// set keep their value. Returns false when the file does not exist.
    pub fn load_env_file(path: impl AsRef<Path>) -> Result<bool, ConfigError> {
        let path = path.as_ref();
        match dotenvy::from_path(path) {
            Ok(()) => {
                info!("Loaded environment from {}", path.display());
                Ok(true)
            }
            Err(e) if e.not_found() => {
                debug!("No env file at {}", path.display());
                Ok(false)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    async fn load_file(config_path: &str) -> Result<FileConfig, ConfigError> {
        let content = match fs::read_to_string(config_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config file at {}, using environment only", config_path);
                return Ok(FileConfig::default());
            }
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: config_path.to_string(),
                    reason: e.to_string(),
                })
            }
        };

        debug!("Loading config file: {}", config_path);

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            reason: format!("{}: {}", config_path, e),
        })
    }
}
