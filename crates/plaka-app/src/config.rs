//! Configuration management for plaka-checker
//!
//! Config stored at: ~/.config/plaka-checker/config.json

use plaka_domain::GrammarProfile;
use plaka_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// External plate detector command line
    #[serde(default)]
    pub detector_command: Option<String>,

    /// External OCR recognizer command line
    #[serde(default)]
    pub recognizer_command: Option<String>,

    /// Minimum detector confidence to keep a detection
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,

    /// Grammar precedence list (full, image_legacy)
    #[serde(default)]
    pub grammar_profile: GrammarProfile,

    /// Context snippet padding around plate boxes, in pixels
    #[serde(default = "default_context_padding")]
    pub context_padding: i32,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,
}

fn default_min_confidence() -> f32 {
    0.25
}

fn default_context_padding() -> i32 {
    50
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detector_command: None,
            recognizer_command: None,
            min_confidence: default_min_confidence(),
            grammar_profile: GrammarProfile::default(),
            context_padding: default_context_padding(),
            output_format: default_output_format(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("plaka-checker");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir)
            .map_err(|e| ConfigError::SaveError(e.to_string()))?;

        let path = Self::config_path()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)
            .map_err(|e| ConfigError::SaveError(e.to_string()))?;
        Ok(())
    }
}
