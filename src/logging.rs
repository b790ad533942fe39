//! Subscriber setup. Quiet by default, `info` with `--verbose`, `RUST_LOG` wins.

use tracing_subscriber::EnvFilter;

pub fn init_logger(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
