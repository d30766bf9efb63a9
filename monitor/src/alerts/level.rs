//! Lag severity levels and the debounce decision

use serde::{Deserialize, Serialize};
use std::fmt;

use super::state::PersistedState;
use crate::errors::ConfigError;

/// Discrete lag severity, ordered from nominal to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AlertLevel {
    #[default]
    Nominal,
    Level1,
    Level2,
    Level3,
}

impl AlertLevel {
    pub fn as_u8(self) -> u8 {
        match self {
            AlertLevel::Nominal => 0,
            AlertLevel::Level1 => 1,
            AlertLevel::Level2 => 2,
            AlertLevel::Level3 => 3,
        }
    }
}

impl TryFrom<u8> for AlertLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AlertLevel::Nominal),
            1 => Ok(AlertLevel::Level1),
            2 => Ok(AlertLevel::Level2),
            3 => Ok(AlertLevel::Level3),
            other => Err(format!("alert level must be between 0 and 3, got {}", other)),
        }
    }
}

impl From<AlertLevel> for u8 {
    fn from(level: AlertLevel) -> Self {
        level.as_u8()
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Lag cutoffs for levels 1, 2 and 3. Always non-decreasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertThresholds {
    level_1: i64,
    level_2: i64,
    level_3: i64,
}

impl AlertThresholds {
    pub fn new(level_1: i64, level_2: i64, level_3: i64) -> Result<Self, ConfigError> {
        if level_1 > level_2 || level_2 > level_3 {
            return Err(ConfigError::InvalidValue {
                field: "LEVEL_1/LEVEL_2/LEVEL_3".to_string(),
                reason: format!(
                    "thresholds must be non-decreasing, got {} / {} / {}",
                    level_1, level_2, level_3
                ),
            });
        }
        Ok(Self {
            level_1,
            level_2,
            level_3,
        })
    }

    pub fn level_1(&self) -> i64 {
        self.level_1
    }

    pub fn level_2(&self) -> i64 {
        self.level_2
    }

    pub fn level_3(&self) -> i64 {
        self.level_3
    }
}

/// Map a lag to its level. Each cutoff is inclusive: a lag equal to a cutoff gets the higher level.
pub fn classify(lag: i64, thresholds: &AlertThresholds) -> AlertLevel {
    if lag >= thresholds.level_3 {
        AlertLevel::Level3
    } else if lag >= thresholds.level_2 {
        AlertLevel::Level2
    } else if lag >= thresholds.level_1 {
        AlertLevel::Level1
    } else {
        AlertLevel::Nominal
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertChange {
    Escalated,
    DeEscalated,
}

/// Outcome of comparing this cycle's level with the last one sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertDecision {
    pub lag: i64,
    pub level: AlertLevel,
    pub change: Option<AlertChange>,
}

impl AlertDecision {
    /// Text to deliver, if the level changed
    pub fn message(&self) -> Option<String> {
        match self.change {
            Some(AlertChange::Escalated) => Some(format!(
                "Alert Level {}: Block height difference is {} blocks!",
                self.level, self.lag
            )),
            Some(AlertChange::DeEscalated) => Some(format!(
                "Alert Level Dropping to {}: Block height difference is {} blocks!",
                self.level, self.lag
            )),
            None => None,
        }
    }

    /// Only level changes are persisted
    pub fn requires_save(&self) -> bool {
        self.change.is_some()
    }
}

pub fn decide(lag: i64, thresholds: &AlertThresholds, previous: &PersistedState) -> AlertDecision {
    let level = classify(lag, thresholds);
    let change = match level.cmp(&previous.last_alert_level) {
        std::cmp::Ordering::Greater => Some(AlertChange::Escalated),
        std::cmp::Ordering::Less => Some(AlertChange::DeEscalated),
        std::cmp::Ordering::Equal => None,
    };

    AlertDecision { lag, level, change }
}
