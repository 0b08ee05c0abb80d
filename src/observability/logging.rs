//! Tracing subscriber initialization.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::schema::LoggingConfig;

/// Initialize the global tracing subscriber.
///
/// The configured level applies to this crate and tower-http; a
/// `RUST_LOG` environment variable overrides it entirely. Safe to call
/// once per process; intended for the embedding binary, not the library.
pub fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "webinfo_api={level},tower_http={level}",
            level = config.level
        ))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
