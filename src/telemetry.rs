// 📝 Telemetry - tracing subscriber shared by the binaries
//
// RUST_LOG wins over the configured filter. Output goes to stderr; stdout is
// reserved for the JSON report.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber.
///
/// Calling it twice is harmless: the second call keeps the first subscriber.
pub fn init(default_filter: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .with_context(|| format!("Invalid log filter: {}", default_filter))?,
    };

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }

    Ok(())
}
