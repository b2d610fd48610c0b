//! Logging initialization

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing output for the viewer.
///
/// Filtering follows `RUST_LOG` when set; otherwise Morphbot crates log at
/// debug level and the GPU stack is kept at warn.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,morphbot=debug,wgpu=warn,naga=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}
