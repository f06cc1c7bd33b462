//! `RUST_LOG`-driven tracing setup. The CLI gets human-readable output;
//! the channel service and controller run unattended and get JSON lines
//! so they can be shipped to a log collector.

use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Human-readable output for the CLI. `verbose` forces `debug` level the way
/// `bench-cli`'s `--verbose` flag does, overriding `RUST_LOG` when set.
pub fn init_tracing_cli(verbose: bool) {
    let filter = if verbose { EnvFilter::new("debug") } else { env_filter() };
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

/// One JSON object per line, for the channel service and controller.
pub fn init_tracing_json() {
    tracing_subscriber::fmt().json().with_env_filter(env_filter()).init();
}

/// Picks human or JSON output by name, so callers can route a single env
/// var (`WN_LOG_FORMAT=json`) without importing both functions.
pub fn init_tracing(json: bool) {
    if json {
        init_tracing_json();
    } else {
        init_tracing_human();
    }
}
