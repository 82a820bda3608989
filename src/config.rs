use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Free-form label for the loaded profile.
    pub profile_name: String,
    pub scanner: ScannerDefaults,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            profile_name: "base".to_string(),
            scanner: ScannerDefaults::default(),
        }
    }
}

/// Values applied to every scan request unless overridden on the command line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerDefaults {
    pub batch: Option<u32>,
    pub max_versions: Option<u32>,
    pub caching: Option<u32>,
    pub cache_blocks: Option<bool>,
    /// `family:qualifier` columns added to every request
    pub columns: Vec<String>,
}

impl Default for ScannerDefaults {
    fn default() -> Self {
        Self {
            batch: Some(10),
            max_versions: None,
            caching: None,
            cache_blocks: None,
            columns: Vec::new(),
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<ToolConfig, ConfigError> {
    if let Some(path) = path {
        load_config_from_path(path)
    } else {
        Ok(default_config().clone())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<ToolConfig, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    toml::from_str::<ToolConfig>(&raw).map_err(|source| ConfigError::Parse {
        path: path_display,
        source,
    })
}

pub fn default_config() -> &'static ToolConfig {
    static DEFAULT_CONFIG: LazyLock<ToolConfig> = LazyLock::new(ToolConfig::default);
    &DEFAULT_CONFIG
}
