use std::path::{Path, PathBuf};

use equiviz_core::ApiConfig;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::CliError;

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FileConfig {
    pub api_url: Option<String>,
}

/// `<config dir>/equiviz/config.toml`, if the platform has a config dir.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("equiviz").join("config.toml"))
}

/// Read the config file. A missing file is the same as an empty one.
pub fn load_file(path: &Path) -> Result<FileConfig, CliError> {
    if !path.exists() {
        debug!("No config file at {:?}", path);
        return Ok(FileConfig::default());
    }
    let raw = std::fs::read_to_string(path)
        .map_err(|e| CliError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
    toml::from_str(&raw)
        .map_err(|e| CliError::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Pick the API location: `--api-url` beats the environment, which beats the
/// config file, which beats the built-in default.
pub fn resolve(
    file: &FileConfig,
    env_url: Option<&str>,
    flag_url: Option<&str>,
) -> Result<ApiConfig, CliError> {
    let chosen = flag_url
        .or(env_url)
        .or(file.api_url.as_deref())
        .filter(|url| !url.trim().is_empty());

    match chosen {
        Some(url) => {
            info!("Using API at {}", url);
            ApiConfig::new(url).map_err(|e| CliError::Config(e.to_string()))
        }
        None => Ok(ApiConfig::default()),
    }
}
