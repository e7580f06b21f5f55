//! Where token-core keeps its files on disk.
//!
//! ```text
//! <config dir>/token-core/
//!   config.yaml     engine settings
//!   palettes/       user palettes, looked up before the built-in ones
//!   logs/           daily rolling log files
//! ```
//!
//! `<config dir>` is `$XDG_CONFIG_HOME` (falling back to `~/.config`) on
//! Unix and macOS, and `%APPDATA%` on Windows.

use std::{env, fs, path::PathBuf};

use anyhow::{Context, Result};

const APP_DIR: &str = "token-core";

pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    let base = env::var_os("APPDATA").map(PathBuf::from);

    #[cfg(not(target_os = "windows"))]
    let base = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")));

    base.map(|dir| dir.join(APP_DIR))
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

pub fn palettes_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("palettes"))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Create the logs directory if needed and return it
pub fn ensure_logs_dir() -> Result<PathBuf> {
    let dir = logs_dir().context("No config directory available")?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_under_config_dir() {
        let Some(config) = config_dir() else {
            return;
        };
        assert!(config.ends_with(APP_DIR));
        assert!(palettes_dir().unwrap().starts_with(&config));
        assert!(logs_dir().unwrap().starts_with(&config));
        assert_eq!(config_file().unwrap().parent(), Some(config.as_path()));
    }
}
