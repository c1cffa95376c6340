use anyhow::{bail, Result};

use vibewise_enrich::Config;

use crate::engine::Engine;

/// One-shot recommendation from the command line.
pub async fn run_recommend(config: &Config, query: &str, top_k: usize, json: bool) -> Result<()> {
    if query.trim().is_empty() {
        bail!("Query must not be empty");
    }

    let engine = Engine::load(config).await?;
    let records = engine.recommend_enriched(query, top_k).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No matches for \"{}\".", query.trim());
        return Ok(());
    }

    println!("\n\u{1f3b6} Top {} vibes for \"{}\"\n", records.len(), query.trim());
    for (i, record) in records.iter().enumerate() {
        println!("  {}. {} \u{2014} {}", i + 1, record.song, record.artist);
        if let Some(cover) = &record.cover {
            println!("     cover: {cover}");
        }
        if let Some(link) = &record.link {
            println!("     watch: {link}");
        }
    }

    Ok(())
}
