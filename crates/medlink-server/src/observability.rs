// Tracing initialization with env-filter support.
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes the tracing subscriber.
///
/// Prefers `RUST_LOG` from the environment, otherwise uses the provided
/// level string. Safe to call more than once (subsequent calls are no-ops),
/// which keeps parallel test binaries from fighting over the global
/// subscriber.
pub fn init_tracing(level: &str) {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|_| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init();
}
