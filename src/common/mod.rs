//! Shared utilities that glue the different domains together.
pub mod config;
pub mod error;
pub mod log;

pub use config::{AppCfg, ConfigError, LogFormat};
pub use error::{EncodingError, ErrorCode, ModelError, ServiceError, ServiceResult};
