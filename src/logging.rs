//! Tracing subscriber setup.

use tracing_subscriber::{fmt as tracing_fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "warn";

/// Installs a stderr subscriber filtered by `RUST_LOG`.
///
/// Calling this more than once keeps the first subscriber.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = tracing_fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
