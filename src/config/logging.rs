use std::env;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::errors::InternalError;

/// Initialize the tracing subscriber with console output.
/// The filter comes from `LOG_LEVEL` (defaults to `info`).
pub fn init_logging() -> Result<(), InternalError> {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_new(&log_level)
        .map_err(|e| InternalError::Logging(format!("invalid log level {}: {}", log_level, e)))?;

    let console_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .map_err(|e| InternalError::Logging(e.to_string()))?;

    Ok(())
}
