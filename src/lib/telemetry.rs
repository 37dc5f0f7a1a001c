//! Logging bootstrap for binaries embedding the sign-up flow. The library
//! itself only emits `tracing` events; installing a subscriber is left to
//! the host application.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

/// Builds the env filter; `RUST_LOG` wins over the default level.
#[must_use]
pub fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

/// Installs a global fmt subscriber.
///
/// # Errors
/// Fails if a global subscriber was already set.
pub fn init(level: Level) -> Result<()> {
    let fmt_layer = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    let subscriber = Registry::default().with(fmt_layer).with(env_filter(level));

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
