//! Diagnostic logging setup
//!
//! Progress lines go to stdout; tracing output goes to stderr so that it
//! never mixes with them. `RUST_LOG` takes precedence over `--debug`.

use tracing_subscriber::EnvFilter;

pub fn setup_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
