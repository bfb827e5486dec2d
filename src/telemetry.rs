use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when `LOG_LEVEL` is unset or invalid.
const DEFAULT_FILTER: &str = "warn";

/// Installs the global subscriber. Logs go to stderr, stdout belongs to the shell.
pub fn init_tracing() {
    let fmt_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    let filter_layer = EnvFilter::try_from_env("LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
