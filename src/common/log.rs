//! Tracing subscriber setup. JSON lines by default, compact text on request.

use tracing_subscriber::EnvFilter;

use super::config::{AppCfg, LogFormat};

pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Install the global subscriber described by `cfg`.
///
/// Fails if the filter directive does not parse or a subscriber is already set.
pub fn init(cfg: &AppCfg) -> Result<(), InitError> {
    let filter = EnvFilter::try_new(&cfg.log_filter)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match cfg.log_format {
        LogFormat::Json => builder.json().with_current_span(false).try_init(),
        LogFormat::Text => builder.compact().try_init(),
    }
}
