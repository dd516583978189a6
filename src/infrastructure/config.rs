//! Configuration management

use crate::domain::sample::DEFAULT_SAMPLE_EXTENSIONS;
use crate::error::{LiveTaggerError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "LIVETAGGER_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Value written to `xmp:CreatorTool` whenever metadata changes
    pub creator_tool: String,

    /// Whether to stamp `xmp:CreateDate` / `xmp:MetadataDate` on changes
    pub stamp_dates: bool,

    /// File extensions treated as samples
    pub extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            creator_tool: "Updated by LiveTagger".to_string(),
            stamp_dates: true,
            extensions: DEFAULT_SAMPLE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LiveTaggerError::Config(format!("Config file not found: {}", path.display()))
            } else {
                LiveTaggerError::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve config from an explicit path, then `LIVETAGGER_CONFIG`, then defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::load_from_file(&PathBuf::from(path)),
            _ => Ok(Config::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.extensions.iter().all(|ext| ext.trim().is_empty()) {
            return Err(LiveTaggerError::Config(
                "extensions must list at least one file extension".to_string(),
            ));
        }

        Ok(())
    }
}
