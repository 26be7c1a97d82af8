/// Environment-driven runtime configuration.
pub mod config;
/// Tracing subscriber setup.
pub mod telemetry;

pub use config::{Config, ConfigError, LogFormat};
