//! Diagnostic logging.
//!
//! The crate only emits `tracing` events. Applications embedding the store
//! either install their own subscriber or call [`init`].

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a stderr subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Calling it again after a subscriber is installed does nothing.
///
/// # Example
/// ```bash
/// RUST_LOG=tally_core=debug my-counter-app
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
