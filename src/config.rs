use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use crate::error::{HeadersError, Result};
use crate::options::{Cli, ExtractorKind};

pub const DEFAULT_MIRROR: &str = "https://nodejs.org/download/release";
pub const DEFAULT_RELEASES_URL: &str = "https://releases.electronjs.org/releases.json";

/// Contents of the optional `config.json`. Every field may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub mirror: Option<String>,
    pub releases_url: Option<String>,
    pub extractor: Option<ExtractorKind>,
}

/// Settings after merging flags, environment, config file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub mirror: String,
    pub releases_url: String,
    pub extractor: ExtractorKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mirror: DEFAULT_MIRROR.to_string(),
            releases_url: DEFAULT_RELEASES_URL.to_string(),
            extractor: ExtractorKind::default(),
        }
    }
}

impl Settings {
    pub fn merge(cli: &Cli, file: FileConfig) -> Self {
        let defaults = Settings::default();
        Self {
            mirror: cli.mirror.clone().or(file.mirror).unwrap_or(defaults.mirror),
            releases_url: cli
                .releases_url
                .clone()
                .or(file.releases_url)
                .unwrap_or(defaults.releases_url),
            extractor: cli.extractor.or(file.extractor).unwrap_or(defaults.extractor),
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "node-headers", "node-headers")
        .map(|dirs| dirs.config_dir().join("config.json"))
}

/// Reads the config file if there is one. Nothing is written.
pub fn load_config() -> Result<FileConfig> {
    match config_path() {
        Some(path) if path.exists() => load_config_from(&path),
        _ => Ok(FileConfig::default()),
    }
}

pub fn load_config_from(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path).map_err(|e| HeadersError::fs(path, e))?;
    serde_json::from_str(&content).map_err(|e| HeadersError::ConfigError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
