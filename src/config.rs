//! Engine configuration persistence
//!
//! Stores engine preferences in `~/.config/token-core/config.yaml`

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::util::DEFAULT_TAB_SIZE;

/// Engine configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Tab width in columns, clamped to `[0, 32]` when applied
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,
    /// Whether glyphs report their classified color at all
    #[serde(default = "default_true")]
    pub colorizer_enabled: bool,
    /// Palette id (e.g., "dark", "retro-blue", or a user palette file stem)
    #[serde(default = "default_palette")]
    pub palette: String,
    /// Built-in language id ("glsl", "c", "cpp", "lua")
    #[serde(default)]
    pub language: Option<String>,
    /// Start in overwrite mode
    #[serde(default)]
    pub overwrite: bool,
    /// Start read-only
    #[serde(default)]
    pub read_only: bool,
}

fn default_tab_size() -> usize {
    DEFAULT_TAB_SIZE
}

fn default_true() -> bool {
    true
}

fn default_palette() -> String {
    "dark".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tab_size: default_tab_size(),
            colorizer_enabled: true,
            palette: default_palette(),
            language: None,
            overwrite: false,
            read_only: false,
        }
    }
}

impl EngineConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = crate::config_paths::config_file().context("No config directory available")?;
        self.save_to(&path)
    }

    /// Save config to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
