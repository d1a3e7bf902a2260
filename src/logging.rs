//! Sets up log output for the command line tools.

use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Install a subscriber that writes logs to stderr.
///
/// The level defaults to `warn` and can be overridden with the `RUST_LOG`
/// environment variable, e.g. `RUST_LOG=budget_insights=debug`. Stdout is left
/// for report output.
pub fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    // A subscriber may already be set, e.g. by a test harness.
    if tracing_subscriber::registry()
        .with(filter)
        .with(stderr_log)
        .try_init()
        .is_err()
    {
        tracing::debug!("Logging was already initialised");
    }
}
