//! Process-wide structured logging.
//!
//! `RUST_LOG`, when set, overrides the filter derived from configuration.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{LogFormat, ServerConfig};

/// Default filter directives for the configured level and environment.
///
/// Statement logging from `sqlx` is only kept in development.
pub fn default_directives(config: &ServerConfig) -> String {
    let level = LevelFilter::from_level(config.log_level);
    let sqlx = if config.is_development() {
        level
    } else {
        LevelFilter::WARN
    };
    format!("{level},tower_http={level},sqlx={sqlx}")
}

/// Install the global subscriber. Returns an error if one is already set.
pub fn init(config: &ServerConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config)));

    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true).with_span_list(false))
            .try_init(),
        LogFormat::Console => registry.with(fmt::layer().with_target(true)).try_init(),
    }
}
