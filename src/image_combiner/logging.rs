//! Tracing setup for the combiner binary.

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor the config yields a valid one:
/// this crate at info, per-request traces at debug, dependencies at warn.
pub const DEFAULT_FILTER: &str = "warn,image_combiner=info,tower_http=debug";

/// `RUST_LOG` wins over the configured level. A configured level that fails
/// to parse falls back to [`DEFAULT_FILTER`].
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_logging(config: &LoggingConfig) {
    let builder = tracing_subscriber::fmt().with_env_filter(build_filter(config));

    // Ignored when a subscriber is already installed.
    let _ = if config.json {
        builder.json().with_current_span(false).try_init()
    } else {
        builder.with_target(true).compact().try_init()
    };
}
