//! Virtual try-on application: configuration, placement controls, image
//! codec and the session that ties them to the compositor.

pub mod codec;
pub mod config;
pub mod controls;
pub mod session;

use config::AppConfig;

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::debug!("No .env file found, using system environment variables");
}

/// Load `.env` and the runtime configuration.
pub fn init_foundation() -> Result<AppConfig, anyhow::Error> {
    load_dotenv();
    let config = AppConfig::load()?;
    tracing::debug!(?config, "Configuration loaded");
    Ok(config)
}
