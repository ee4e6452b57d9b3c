use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid chunk range {min}..={max}: need 1 <= min_chunk <= max_chunk")]
    InvalidChunkRange { min: usize, max: usize },
}

/// How the demo harness splits and paces its input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamSettings {
    /// Smallest chunk, in characters.
    pub min_chunk: usize,
    /// Largest chunk, in characters (inclusive).
    pub max_chunk: usize,
    /// Pause between chunks.
    pub delay_ms: u64,
    /// Fixed RNG seed for reproducible chunking; random when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            min_chunk: 2,
            max_chunk: 19,
            delay_ms: 20,
            seed: None,
        }
    }
}

impl StreamSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_chunk == 0 || self.min_chunk > self.max_chunk {
            return Err(ConfigError::InvalidChunkRange {
                min: self.min_chunk,
                max: self.max_chunk,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Styled text written as it streams.
    #[default]
    Terminal,
    /// The finished document as HTML.
    Html,
    /// One merged parser event per line.
    Events,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputFormat,
    pub stream: StreamSettings,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config.stream.validate()?;
        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-trickle");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }
}
