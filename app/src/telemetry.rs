//! Tracing bootstrap for the host shell.

use tracing_subscriber::EnvFilter;

use vd_shared::config::LoggingConfig;

/// Initialize the global tracing subscriber.
///
/// Called once by the host shell at startup. `RUST_LOG` wins over the
/// configured level; calling this twice is harmless.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.colored)
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .try_init();

    if result.is_ok() {
        tracing::info!(level = %config.level, "tracing initialized");
    }
}
