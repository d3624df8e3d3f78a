//! Logging setup for programs embedding the locator
//!
//! The library itself only emits `tracing` events; this installs a formatted
//! subscriber for callers that don't bring their own.

use tracing_subscriber::EnvFilter;

/// Builds the env filter for a verbosity level
///
/// `RUST_LOG` takes precedence when it is set.
pub fn build_filter(verbose: u8, quiet: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("efta_locator=info,warn"),
            1 => EnvFilter::new("efta_locator=debug,info"),
            2 => EnvFilter::new("efta_locator=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Returns `false` when a global subscriber was already installed, in which
/// case the existing one is left in place.
pub fn setup_logging(verbose: u8, quiet: bool) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose, quiet))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .try_init()
        .is_ok()
}
