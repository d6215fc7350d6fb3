//! Configuration loaded from `~/.insight-stream/config.toml`.
//!
//! **Security**: this struct never stores API keys or other secrets. The
//! analysis credential is read from the environment variable named in
//! `analysis.api_key_env`, at first use.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The analysis credential env var is unset or blank. Fatal to the
    /// analysis action only; the rest of the UI keeps working.
    #[error("analysis credential missing: set the {env} environment variable")]
    MissingCredential { env: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(#[from] toml::de::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Settings for the remote analysis service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Model identifier passed to the generation endpoint.
    pub model: String,
    /// Name of the environment variable holding the service credential.
    pub api_key_env: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            max_output_tokens: 2048,
            temperature: 0.4,
        }
    }
}

/// Settings for the terminal UI loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Crossterm event-poll interval in milliseconds.
    pub tick_ms: u64,
    /// Simulated upstream round-trip for the poll action, in milliseconds.
    pub poll_delay_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: 250,
            poll_delay_ms: 2000,
        }
    }
}

impl Config {
    /// Default on-disk location: `~/.insight-stream/config.toml`.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".insight-stream")
            .join("config.toml")
    }

    /// Load from the default path, falling back to defaults when the file
    /// does not exist. A present-but-invalid file is an error.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Resolve the analysis credential from the environment.
    ///
    /// Deliberately lazy: absence is only an error once an analysis is
    /// actually requested.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        std::env::var(&self.analysis.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingCredential {
                env: self.analysis.api_key_env.clone(),
            })
    }
}
