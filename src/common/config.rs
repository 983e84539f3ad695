//! Runtime configuration loaded from the process environment.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const ENV_MODEL_PATH: &str = "CHURN_MODEL_PATH";
pub const ENV_BIND_ADDR: &str = "CHURN_BIND_ADDR";
pub const ENV_LOG: &str = "CHURN_LOG";
pub const ENV_LOG_FORMAT: &str = "CHURN_LOG_FORMAT";
pub const ENV_CORS: &str = "CHURN_CORS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}: invalid socket address {value:?}")]
    BindAddr { key: &'static str, value: String },

    #[error("{key}: expected \"json\" or \"text\", got {value:?}")]
    LogFormat { key: &'static str, value: String },

    #[error("{key}: expected a boolean, got {value:?}")]
    Bool { key: &'static str, value: String },
}

/// Output shape of the tracing subscriber.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LogFormat {
    Json,
    Text,
}

/// Snapshot of configuration values consumed by the service.
#[derive(Clone, Debug)]
pub struct AppCfg {
    pub model_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub log_filter: String,
    pub log_format: LogFormat,
    pub cors_enabled: bool,
}

impl AppCfg {
    /// Create a configuration snapshot from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a snapshot from an arbitrary key lookup. Unset keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bind = env_or(ENV_BIND_ADDR, "127.0.0.1:5000");
        let bind_addr: SocketAddr = bind.parse().map_err(|_| ConfigError::BindAddr {
            key: ENV_BIND_ADDR,
            value: bind.clone(),
        })?;

        let format = env_or(ENV_LOG_FORMAT, "json");
        let log_format = match format.to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "text" => LogFormat::Text,
            _ => {
                return Err(ConfigError::LogFormat {
                    key: ENV_LOG_FORMAT,
                    value: format,
                })
            }
        };

        let cors = env_or(ENV_CORS, "true");
        let cors_enabled = parse_bool(&cors).ok_or(ConfigError::Bool {
            key: ENV_CORS,
            value: cors.clone(),
        })?;

        Ok(Self {
            model_path: PathBuf::from(env_or(ENV_MODEL_PATH, "./model.json")),
            bind_addr,
            log_filter: env_or(ENV_LOG, "info"),
            log_format,
            cors_enabled,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
