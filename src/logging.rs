use anyhow::Result;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Timestamped console output, `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
