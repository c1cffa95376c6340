use anyhow::{Context, Result};

use vibewise_enrich::Config;

use crate::engine::Engine;
use crate::tui;

/// Launch the interactive app: load resources, then hand the terminal to
/// the TUI until the user quits.
pub async fn run_vibe(config: Config) -> Result<()> {
    println!("Loading model, index, and catalog...");
    let engine = Engine::load(&config).await?;

    let handle = tokio::runtime::Handle::current();
    tokio::task::spawn_blocking(move || tui::run_tui(&engine, &handle))
        .await
        .context("TUI task failed")??;

    Ok(())
}
