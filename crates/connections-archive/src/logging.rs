//! Tracing setup for the binary.

use tracing_subscriber::EnvFilter;

/// Crates whose events are shown by default.
const CRATES: [&str; 2] = ["connections_archive", "connections_dataset"];

/// Build the log filter.
///
/// A non-empty, valid `rust_log` is used verbatim so it can raise or lower
/// any target. Otherwise our crates log at `info`, or `debug` when verbose.
pub fn log_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    if let Some(directives) = rust_log.filter(|s| !s.trim().is_empty()) {
        match EnvFilter::try_new(directives) {
            Ok(filter) => return filter,
            Err(e) => eprintln!("  Ignoring invalid RUST_LOG {directives:?}: {e}"),
        }
    }

    let level = if verbose { "debug" } else { "info" };
    let defaults: Vec<String> = CRATES.iter().map(|c| format!("{c}={level}")).collect();
    EnvFilter::new(defaults.join(","))
}

/// Install the global subscriber, writing to stderr.
pub fn init_tracing(verbose: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref(), verbose))
        .with_writer(std::io::stderr)
        .init();
}
