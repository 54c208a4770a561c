//! Digit Pad - Main Entry Point

use std::error::Error;

use digitpad_app::{AppConfig, DigitPad};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Starting Digit Pad...");

    let mut config = AppConfig::from_env()?;

    // Command line overrides the classifier base URL
    if let Some(api_base) = std::env::args().nth(1) {
        config = config.with_api_base(api_base);
        config.validate()?;
    }
    tracing::info!(api = %config.api_base, grid = config.grid, "configuration loaded");

    DigitPad::new(config).run()?;

    Ok(())
}
