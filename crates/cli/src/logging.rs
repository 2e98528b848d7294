//! Tracing subscriber setup
//!
//! Logs go to stderr so that SVG written to stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Filter used when neither RUST_LOG, `-v` nor the config set one
pub const DEFAULT_FILTER: &str = "warn";

/// Filter directive for the given `-v` count.
///
/// Without `-v` the configured directive is used.
pub fn filter_directive(verbose: u8, configured: &str) -> String {
    match verbose {
        0 => configured.to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the global subscriber. RUST_LOG takes precedence over everything.
pub fn init(verbose: u8, configured: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbose, configured)));

    // A subscriber may already be installed (tests); keep the existing one
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
