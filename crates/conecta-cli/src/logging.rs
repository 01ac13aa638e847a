//! Tracing setup for the CLI.

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// Diagnostics go to stderr so command output stays pipeable. `RUST_LOG`
/// selects levels; without it only warnings and errors show up.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
