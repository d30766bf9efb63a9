//! Custom error types for the height monitor
//!
//! Provides structured error handling with context for different failure scenarios.

use std::fmt;

/// Main error type for the height monitor
#[derive(Debug)]
pub enum MonitorError {
    /// Endpoint unreachable or too slow
    Transport(TransportError),

    /// Endpoint answered with something we cannot use
    Protocol(ProtocolError),

    /// State file could not be read or written
    Persistence(PersistenceError),

    /// Invalid startup configuration
    Config(ConfigError),
}

/// Network-level failures
#[derive(Debug)]
pub enum TransportError {
    /// Connection could not be established or the request failed mid-flight
    ConnectionFailed { endpoint: String, reason: String },

    /// Request did not complete within the configured timeout
    Timeout { endpoint: String },
}

/// Response-shape failures
#[derive(Debug)]
pub enum ProtocolError {
    /// Non-success HTTP status
    UnexpectedStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// Body could not be decoded into the expected schema
    InvalidBody { endpoint: String, reason: String },

    /// Height field present but not an integer
    InvalidHeight { endpoint: String, value: String },
}

/// State file failures
#[derive(Debug)]
pub enum PersistenceError {
    ReadFailed { path: String, reason: String },

    WriteFailed { path: String, reason: String },

    /// File exists but does not hold a valid state record
    Malformed { path: String, reason: String },
}

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to load configuration file
    LoadFailed { path: String, reason: String },

    /// Invalid configuration value
    InvalidValue { field: String, reason: String },

    /// Missing required configuration
    MissingRequired { field: String },

    /// Configuration parsing error
    ParseError { reason: String },
}

impl TransportError {
    /// Classify a reqwest failure that happened while sending a request
    pub fn from_reqwest(endpoint: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout {
                endpoint: endpoint.to_string(),
            }
        } else {
            TransportError::ConnectionFailed {
                endpoint: endpoint.to_string(),
                reason: err.to_string(),
            }
        }
    }
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::Transport(e) => write!(f, "Transport error: {}", e),
            MonitorError::Protocol(e) => write!(f, "Protocol error: {}", e),
            MonitorError::Persistence(e) => write!(f, "Persistence error: {}", e),
            MonitorError::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::ConnectionFailed { endpoint, reason } => {
                write!(f, "Request to {} failed: {}", endpoint, reason)
            }
            TransportError::Timeout { endpoint } => {
                write!(f, "Request to {} timed out", endpoint)
            }
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::UnexpectedStatus {
                endpoint,
                status,
                body,
            } => {
                write!(f, "Unexpected status {} from {}: {}", status, endpoint, body)
            }
            ProtocolError::InvalidBody { endpoint, reason } => {
                write!(f, "Failed to decode response from {}: {}", endpoint, reason)
            }
            ProtocolError::InvalidHeight { endpoint, value } => {
                write!(f, "Invalid block height '{}' from {}", value, endpoint)
            }
        }
    }
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::ReadFailed { path, reason } => {
                write!(f, "Failed to read state file '{}': {}", path, reason)
            }
            PersistenceError::WriteFailed { path, reason } => {
                write!(f, "Failed to write state file '{}': {}", path, reason)
            }
            PersistenceError::Malformed { path, reason } => {
                write!(f, "State file '{}' is malformed: {}", path, reason)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path, reason)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
            ConfigError::MissingRequired { field } => {
                write!(f, "Missing required field: {}", field)
            }
            ConfigError::ParseError { reason } => {
                write!(f, "Failed to parse config: {}", reason)
            }
        }
    }
}

impl std::error::Error for MonitorError {}
impl std::error::Error for TransportError {}
impl std::error::Error for ProtocolError {}
impl std::error::Error for PersistenceError {}
impl std::error::Error for ConfigError {}

impl From<TransportError> for MonitorError {
    fn from(err: TransportError) -> Self {
        MonitorError::Transport(err)
    }
}

impl From<ProtocolError> for MonitorError {
    fn from(err: ProtocolError) -> Self {
        MonitorError::Protocol(err)
    }
}

impl From<PersistenceError> for MonitorError {
    fn from(err: PersistenceError) -> Self {
        MonitorError::Persistence(err)
    }
}

impl From<ConfigError> for MonitorError {
    fn from(err: ConfigError) -> Self {
        MonitorError::Config(err)
    }
}
