use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result, anyhow};

use crate::ai::{DEFAULT_BASE_URL, DEFAULT_MODEL};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const MODEL_ENV: &str = "GEMINI_MODEL";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub dark_mode: Option<bool>,
}

/// First non-empty value wins: command line, then environment, then file.
fn resolve(flag: Option<String>, env: Option<String>, file: Option<String>) -> Option<String> {
    [flag, env, file]
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config = serde_json::from_str(&config_content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    /// Persist only the theme flag, keeping whatever else is on disk. An
    /// unreadable file is left untouched and reported.
    pub fn save_dark_mode(path: &Path, dark_mode: bool) -> Result<()> {
        let mut config = Self::load_from(path)?;
        config.dark_mode = Some(dark_mode);
        config.save_to(path)
    }

    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("chatbot").join("config.json"))
    }

    pub fn resolve_api_key(&self, flag: Option<String>) -> Option<String> {
        resolve(flag, std::env::var(API_KEY_ENV).ok(), self.api_key.clone())
    }

    pub fn resolve_model(&self, flag: Option<String>) -> String {
        resolve(flag, std::env::var(MODEL_ENV).ok(), self.model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode.unwrap_or(false)
    }
}
