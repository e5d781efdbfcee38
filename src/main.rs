use anyhow::{Context, Result};
use std::fs;
use tracing_subscriber::EnvFilter;

mod config;
mod errors;
mod handlers;
mod menu;
mod models;
mod services;

#[tokio::main]
async fn main() -> Result<()> {
    // --- Logging setup (stderr, stdout belongs to the menu) ---
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // --- Parse config + credentials ---
    let (cfg, credentials) = config::DemoConfig::from_env_and_args()?;

    tracing::info!("Starting blobstore demo with config: {:?}", cfg);

    // --- Read the key before anything touches the store ---
    let key = fs::read_to_string(&credentials.key_file).with_context(|| {
        format!(
            "Cannot open service account private key file: {}",
            credentials.key_file.display()
        )
    })?;

    // --- Open the session and hand control to the menu ---
    let session = services::session::StoreSession::open(&cfg, &credentials.account, &key)?;
    menu::run(&session, &cfg).await?;

    Ok(())
}
