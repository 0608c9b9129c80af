//! Logging initialization for libertygen.
//!
//! Logs go to stderr so generated files and any stdout consumers stay clean.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging.
///
/// `RUST_LOG` overrides the level; `debug_override` (from `--debug`) raises
/// the default from "info" to "debug".
pub fn init_logging(debug_override: bool) {
    let default_level = if debug_override { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
