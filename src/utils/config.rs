use crate::chat::DEFAULT_LLM_TIMEOUT;
use crate::llm::{DEFAULT_API_BASE, DEFAULT_MODEL};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted request body. Base64 images are big.
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct LLMConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

/// Errors raised while reading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is not set")]
    MissingEnvVar(String),

    #[error("Invalid value '{value}' for {name}: {reason}")]
    Invalid {
        name: String,
        value: String,
        reason: String,
    },
}

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

impl Config {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GEMINI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;

        let timeout_secs = parse_or(&lookup, "LLM_TIMEOUT_SECS", DEFAULT_LLM_TIMEOUT.as_secs())?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "LLM_TIMEOUT_SECS".to_string(),
                value: "0".to_string(),
                reason: "must be at least one second".to_string(),
            });
        }

        let format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "LOG_FORMAT".to_string(),
                    value: other.to_string(),
                    reason: "expected 'pretty' or 'json'".to_string(),
                })
            }
        };

        Ok(Config {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
                max_body_bytes: parse_or(&lookup, "MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
            },
            llm: LLMConfig {
                api_key,
                api_base: lookup("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
                model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
            logging: LoggingConfig { format },
        })
    }
}

impl ServerConfig {
    /// `host:port` string handed to the listener; host names are resolved at bind time.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                name: name.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            })
        }
        _ => Ok(default),
    }
}
