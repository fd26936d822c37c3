//! Tracing initialization for hosts embedding the editor core.
//!
//! The crate itself only *emits* `tracing` events; installing a subscriber is
//! the host's call. [`init`] wires up the usual stack — `RUST_LOG`-driven
//! filtering, formatted output, and `tracing-error`'s span traces — and is
//! safe to call more than once (later calls are no-ops).

use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the default subscriber: `RUST_LOG` filtering (falling back to
/// `info`), formatted events, and an [`ErrorLayer`] so diagnostics carry span
/// context.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .with(ErrorLayer::default())
        .try_init();
}
