use nistads_core::Config;
use nistads_fetch::{check_status, HttpTransport};
use std::path::Path;

pub fn run(config_path: &Path) -> anyhow::Result<()> {
    let config = Config::load_or_default(config_path)?;
    config.validate()?;

    let transport = HttpTransport::new(config.collection.request_timeout_secs)?;
    let runtime = super::runtime()?;
    runtime.block_on(check_status(&transport, &config.endpoints.status_url))?;

    println!("Adsorption database reachable: {}", config.endpoints.status_url);
    Ok(())
}
