//! Logging setup for hosts and tests.

use {std::sync::Once, tracing_subscriber::EnvFilter};

/// Installs a global `tracing` subscriber logging to stderr, filtered by
/// `filter` (e.g. `"warn,zap=debug"`). `LOG_FILTER` in the environment takes
/// precedence.
///
/// Only the first call has an effect. A subscriber installed by the host
/// beforehand is left in place.
pub fn initialize(filter: &str) {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        let filter =
            EnvFilter::try_from_env("LOG_FILTER").unwrap_or_else(|_| EnvFilter::new(filter));
        let result = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
        if let Err(err) = result {
            tracing::debug!(?err, "subscriber already installed");
        }
    });
}
