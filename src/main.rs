//! Admin console for an identity and access management server
//!
//! Desktop entry point: sets up logging, loads the configuration and opens
//! the Dioxus window.

use anyhow::Context;
use kc_console_core::ConsoleConfig;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // RUST_LOG wins; otherwise info for everything
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = ConsoleConfig::load().context("Failed to load console configuration")?;
    tracing::debug!("Using server {} (realm '{}')", config.server_url, config.realm);

    kc_console_ui::launch(config).context("Failed to start the console")?;
    Ok(())
}
