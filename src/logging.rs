//! Tracing subscriber setup for hosts embedding the editor core.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Env var holding the filter directives, e.g. `schemacanvas=debug`.
pub const LOG_ENV: &str = "SCHEMACANVAS_LOG";

const DEFAULT_FILTER: &str = "info";

/// Install a console subscriber filtered by [`LOG_ENV`].
///
/// Returns false if a global subscriber was already set; the existing one
/// is kept.
pub fn init() -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .try_init()
        .is_ok()
}

/// Subscriber for tests: output goes through the test harness capture.
pub fn init_for_tests() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}
