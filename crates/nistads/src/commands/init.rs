use nistads_core::Config;
use nistads_store::{atomic_write, Paths};
use std::path::Path;

pub fn run(paths: &Paths, config_path: &Path) -> anyhow::Result<()> {
    if write_default_config(config_path)? {
        println!("✓ Wrote default configuration to {}", config_path.display());
    } else {
        println!("Configuration already exists at {}", config_path.display());
    }
    println!("Datasets will be written to {}", paths.root().display());
    Ok(())
}

/// Returns false when a configuration file is already present
fn write_default_config(config_path: &Path) -> anyhow::Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }

    let json = serde_json::to_string_pretty(&Config::default())?;
    atomic_write(config_path, json.as_bytes())?;
    Ok(true)
}
