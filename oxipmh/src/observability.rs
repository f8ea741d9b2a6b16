//! Tracing initialization

use tracing_subscriber::EnvFilter;

use crate::config::ProviderConfig;
use crate::error::Result;

/// Initialize tracing from the configured log level.
///
/// When a global subscriber is already installed (tests, embedding hosts
/// with their own setup) this is a no-op.
pub fn init_tracing(config: &ProviderConfig) -> Result<()> {
    let installed = tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(repository = config.repository.name, "tracing initialized");
    }

    Ok(())
}
