use anyhow::Result;

use vibewise_enrich::config::{config_file_path, ensure_config_file};

/// Create the config file if missing and report where it lives.
pub fn run_config() -> Result<()> {
    let created = ensure_config_file()?;
    let path = config_file_path();

    if created {
        println!("Created config file: {}", path.display());
    } else {
        println!("Config file already exists: {}", path.display());
    }

    Ok(())
}
