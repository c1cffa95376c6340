use anyhow::Result;

use vibewise_core::Catalog;
use vibewise_enrich::{config::config_file_path, Config};

pub fn show_status(config: &Config) -> Result<()> {
    println!("\n\u{1f4ca} VibeWise Status\n");
    println!("  Data dir:   {}", config.data_dir.display());

    let config_path = config_file_path();
    if config_path.exists() {
        println!("  Config:     {}", config_path.display());
    } else {
        println!("  Config:     (none; run `vibewise config` to create one)");
    }

    match Catalog::load(config.catalog_path()) {
        Ok(catalog) => println!("  Catalog:    {} tracks", catalog.len()),
        Err(e) => println!("  Catalog:    unavailable ({e})"),
    }

    let index_path = config.index_path();
    match std::fs::metadata(&index_path) {
        Ok(meta) => println!("  Index:      {} ({} bytes)", index_path.display(), meta.len()),
        Err(_) => println!("  Index:      missing ({})", index_path.display()),
    }

    println!("  Video API:  {}", config.video_api_base);

    Ok(())
}
