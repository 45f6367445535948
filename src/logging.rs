//! Tracing subscriber setup
//!
//! Installs a `fmt` subscriber on stderr so stdout stays free for verdicts and
//! batch records. `RUST_LOG` wins over the configured level. Records from the
//! evaluator crate, which logs through `log`, are picked up by the subscriber's
//! `log` bridge.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber; later calls are ignored
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
