use crate::error::{InspectError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Retained history entries before the oldest PDF is revoked.
    pub history_limit: usize,

    /// Default directory for generated PDFs. Current dir when unset.
    pub output_dir: Option<PathBuf>,

    /// Photos larger than this (pixels, longest side) are downscaled
    /// before embedding.
    pub max_photo_px: u32,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| InspectError::Config("no se encontró el directorio home".into()))?;
        Ok(home
            .join(".config")
            .join("inspect-report")
            .join("config.json"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_limit: 20,
            output_dir: None,
            max_photo_px: 1400,
        }
    }
}
