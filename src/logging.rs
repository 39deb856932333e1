//! Diagnostics setup for the CLI.
//!
//! Everything goes to stderr: stdout carries only the confirmation line or
//! requested JSON output. `log` records from the library are bridged into
//! `tracing` by the subscriber's `tracing-log` integration.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber; later calls are no-ops.
pub fn init() {
    init_with_default(DEFAULT_FILTER);
}

pub fn init_with_default(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_does_not_panic() {
        init();
        init_with_default("debug");
        log::info!("logging initialised twice");
    }
}
