use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "info,sqlx=warn";

/// Install the global `tracing` subscriber
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_target(false)
        .init();
}
