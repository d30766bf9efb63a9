//! Durable record of the last lag and the last alert level sent

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use super::level::AlertLevel;
use crate::errors::PersistenceError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub previous_height_diff: i64,
    #[serde(default)]
    pub last_alert_level: AlertLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// YAML-backed state file. Only the scheduling loop touches it, so there is no locking.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or empty file is the bootstrap state
    pub async fn load(&self) -> Result<PersistedState, PersistenceError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No state file at {}, starting from zero", self.path.display());
                return Ok(PersistedState::default());
            }
            Err(e) => {
                return Err(PersistenceError::ReadFailed {
                    path: self.path.display().to_string(),
                    reason: e.to_string(),
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(PersistedState::default());
        }

        serde_yaml::from_str(&content).map_err(|e| PersistenceError::Malformed {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Overwrite the record. Last write wins; partial writes are not guarded against.
    pub async fn save(&self, lag: i64, level: AlertLevel) -> Result<(), PersistenceError> {
        let state = PersistedState {
            previous_height_diff: lag,
            last_alert_level: level,
            updated_at: Some(Utc::now()),
        };

        let write_failed = |reason: String| PersistenceError::WriteFailed {
            path: self.path.display().to_string(),
            reason,
        };

        let data = serde_yaml::to_string(&state).map_err(|e| write_failed(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| write_failed(e.to_string()))?;
        }

        fs::write(&self.path, data)
            .await
            .map_err(|e| write_failed(e.to_string()))?;

        debug!(
            "Saved state to {}: lag {}, level {}",
            self.path.display(),
            lag,
            level
        );
        Ok(())
    }
}
