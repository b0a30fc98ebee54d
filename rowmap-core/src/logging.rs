use tracing_subscriber::EnvFilter;

/// Install a global `tracing` fmt subscriber.
///
/// Respects the `RUST_LOG` environment variable. Falls back to `info` when
/// `RUST_LOG` is not set or cannot be parsed. Calling it more than once is a
/// no-op: the first installed subscriber wins.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
