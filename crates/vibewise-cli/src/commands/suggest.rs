use anyhow::Result;

use vibewise_core::Catalog;
use vibewise_enrich::Config;

/// Print autocomplete suggestions for a partial query.
///
/// Only the catalog is needed here; the model and index stay unloaded.
pub fn run_suggest(config: &Config, prefix: &str) -> Result<()> {
    let catalog = Catalog::load(config.catalog_path())?;
    let suggestions = catalog.suggest(prefix);

    if suggestions.is_empty() {
        println!("No suggestions.");
        return Ok(());
    }

    for suggestion in suggestions {
        println!("{suggestion}");
    }

    Ok(())
}
