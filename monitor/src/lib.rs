pub mod alerts;
pub mod config;
pub mod constants;
pub mod errors;
pub mod health;
pub mod rpc;
pub mod scheduler;
pub mod services;

// Re-export commonly used types
pub use alerts::{AlertLevel, AlertThresholds, PersistedState, StateStore};
pub use config::{Config, ConfigManager};
pub use errors::MonitorError;
pub use scheduler::{CycleOutcome, LagMonitor};
pub use services::{CommandListener, TelegramNotifier};
