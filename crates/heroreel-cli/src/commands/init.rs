use std::path::Path;

use anyhow::{bail, Result};
use tracing::info;

use heroreel_core::AppConfig;

/// Write the default configuration to `path` (or the default location)
pub fn run(path: Option<&Path>, force: bool) -> Result<()> {
    let target = path
        .map(Path::to_path_buf)
        .unwrap_or_else(AppConfig::config_path);

    if target.exists() && !force {
        bail!(
            "Config file already exists: {}\nUse --force to overwrite it.",
            target.display()
        );
    }

    let config = AppConfig::default();
    match path {
        Some(path) => config.save_to(path)?,
        None => config.save()?,
    }

    info!("Wrote default config to {}", target.display());
    println!("Wrote default config to {}", target.display());
    Ok(())
}
