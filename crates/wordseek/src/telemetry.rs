//! Tracing initialization.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes the global tracing subscriber with an env filter.
///
/// Use `RUST_LOG` to configure, e.g. `RUST_LOG=wordseek=debug,info`.
/// Optional — embedders with their own subscriber can skip this.
pub fn init_tracing() {
    let fmt_layer = fmt::layer().with_target(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
