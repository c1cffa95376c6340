use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default Invidious instance for video lookups.
const DEFAULT_VIDEO_API_BASE: &str = "https://inv.nadeko.net";

/// Configuration for vibewise.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (VIBE_* prefix)
/// 3. Config file (~/.config/vibewise/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the prebuilt resources: the embedding model cache,
    /// the vector index, and the track metadata CSV.
    ///
    /// Can be set via:
    /// - CLI: --data-dir /path/to/data
    /// - ENV: VIBE_DATA_DIR
    /// - Config: data_dir = "/path/to/data"
    /// - Default: ~/.local/share/vibewise
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Base URL of the Invidious-compatible instance used for video lookups.
    ///
    /// Can be set via:
    /// - ENV: VIBE_VIDEO_API_BASE
    /// - Config: video_api_base = "https://..."
    #[serde(default = "default_video_api_base")]
    pub video_api_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            video_api_base: default_video_api_base(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/vibewise/config.toml
    /// Reads environment variables with VIBE_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("vibe");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }

    /// Load configuration with a custom data directory.
    ///
    /// This is used when the --data-dir CLI flag is provided.
    pub fn load_with_data_dir(data_dir: PathBuf) -> Result<Self> {
        let mut config = Self::load()?;
        config.data_dir = data_dir;
        Ok(config)
    }

    /// Cache directory the embedding model is loaded from.
    #[must_use]
    pub fn model_dir(&self) -> PathBuf {
        self.data_dir.join("model")
    }

    /// Path of the prebuilt vector index.
    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.data_dir.join("song_index.usearch")
    }

    /// Path of the track metadata table.
    #[must_use]
    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join("song_metadata.csv")
    }
}

/// Get the default data directory.
///
/// Returns: ~/.local/share/vibewise (or platform equivalent)
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vibewise")
}

fn default_video_api_base() -> String {
    DEFAULT_VIDEO_API_BASE.to_string()
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/vibewise/config.toml
/// - macOS: ~/Library/Application Support/vibewise/config.toml
/// - Windows: %APPDATA%\vibewise\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vibewise")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# VibeWise Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (VIBE_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Directory holding the prebuilt resources: the embedding model cache,
# song_index.usearch, and song_metadata.csv
#
# Can also be set via:
# - CLI: vibewise --data-dir /custom/path
# - Environment: VIBE_DATA_DIR=/custom/path
#
# Default: Platform-specific data directory
#data_dir = "/path/to/vibewise-data"

# Invidious-compatible instance used for video lookups
#
# Public instances come and go; point this at one that answers for you.
#
# Can also be set via:
# - Environment: VIBE_VIDEO_API_BASE=https://...
#video_api_base = "https://inv.nadeko.net"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.data_dir.as_os_str().is_empty());
        assert_eq!(config.video_api_base, DEFAULT_VIDEO_API_BASE);
    }

    #[test]
    fn test_config_load() {
        // Should not fail even if config file doesn't exist
        let result = Config::load();
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_with_custom_data_dir() {
        let custom = PathBuf::from("/tmp/vibe-data");
        let config = Config::load_with_data_dir(custom.clone());
        assert!(config.is_ok());
        assert_eq!(config.unwrap().data_dir, custom);
    }

    #[test]
    fn test_resource_paths_under_data_dir() {
        let config = Config::load_with_data_dir(PathBuf::from("/data")).unwrap();
        assert_eq!(config.model_dir(), PathBuf::from("/data/model"));
        assert_eq!(config.index_path(), PathBuf::from("/data/song_index.usearch"));
        assert_eq!(config.catalog_path(), PathBuf::from("/data/song_metadata.csv"));
    }
}
