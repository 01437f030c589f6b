//! Logging setup shared by the binaries.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Install a compact stderr subscriber.
///
/// `RUST_LOG` overrides `default_level` when set. Calling this more than once
/// is harmless; later calls are ignored.
pub fn init(default_level: LevelFilter) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    let _ = tracing_subscriber::registry().with(stderr_layer).try_init();
}
