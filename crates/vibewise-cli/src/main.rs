use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use vibewise_enrich::Config;

mod commands;
mod engine;
mod tui;

#[derive(Debug, Parser)]
#[command(name = "vibewise", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the data directory holding the embedding model cache, the
    /// vector index, and the track catalog (default: ~/.local/share/vibewise)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Recommend songs for a query without entering the TUI
    ///
    /// Embeds the free-text query, runs a nearest-neighbor search over the
    /// prebuilt track index, and enriches the candidates with cover art and
    /// video links fetched from the external lookup services. Rows whose
    /// lookups fail are still printed, just without the missing assets.
    Recommend {
        /// Song or artist name, or any free-text vibe
        query: String,

        /// Number of candidates to return
        #[arg(long, default_value_t = vibewise_search::DEFAULT_TOP_K)]
        top_k: usize,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print autocomplete suggestions for a partial query
    ///
    /// Matches the prefix case-insensitively against the catalog's derived
    /// "song artist" column. Inputs of three characters or fewer produce no
    /// suggestions, mirroring the interactive search box.
    Suggest {
        /// The partially typed query
        prefix: String,
    },
    /// Show resource and configuration status
    Status,
    /// Create the config file if missing and show where it lives
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match cli.data_dir {
        Some(data_dir) => Config::load_with_data_dir(data_dir)?,
        None => Config::load()?,
    };

    match cli.command {
        None => {
            commands::run_vibe(config).await?;
        }
        Some(Commands::Recommend { query, top_k, json }) => {
            commands::run_recommend(&config, &query, top_k, json).await?;
        }
        Some(Commands::Suggest { prefix }) => {
            commands::run_suggest(&config, &prefix)?;
        }
        Some(Commands::Status) => {
            commands::show_status(&config)?;
        }
        Some(Commands::Config) => {
            commands::run_config()?;
        }
    }

    Ok(())
}
