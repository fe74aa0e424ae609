//! Log subscriber setup for the binary.
//!
//! Logs go to stderr so stdout stays machine-readable. `RUST_LOG` wins over
//! the `--log-level` default.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::LogLevel;

/// Installs the global `fmt` subscriber. Later calls are no-ops.
pub fn init_logging(default_level: LogLevel) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str()));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
