//! Logging setup for the inspector.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing, preferring RUST_LOG over `default_filter`.
///
/// Logs go to stderr so stdout stays clean for reports.
pub fn init_with_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
