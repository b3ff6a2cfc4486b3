//! Logging setup

use mailseal_common::{Error, LoggingConfig, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Fails if a
/// subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_target(true).with_level(true))
            .try_init(),
        "text" => registry
            .with(fmt::layer().with_target(true).with_level(true))
            .try_init(),
        other => {
            return Err(Error::Config(format!("Unknown log format: {}", other)));
        }
    };

    installed.map_err(|e| Error::Config(format!("Failed to install logger: {}", e)))
}
