use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs a stderr fmt subscriber. `RUST_LOG` overrides `level` when set.
pub fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    // Ignore the error if a global subscriber is already set (e.g. in tests).
    let _ = tracing::subscriber::set_global_default(subscriber);
    Ok(())
}
