// doctext/src/config.rs
//!
//! Configuration: where converted text goes and how legacy DOC files are
//! handed to the office suite.
//!
//! Loaded from TOML. Every key is optional and falls back to its default:
//!
//! ```toml
//! output_dir = "processed_texts"
//! recursive = true
//!
//! [office]
//! program = "soffice"
//! timeout_secs = 120
//! ```
//!
//! Lookup order when no explicit path is given:
//! 1. `./doctext.toml`
//! 2. `<config dir>/doctext/config.toml` (e.g. `~/.config/doctext/config.toml`)
//! 3. built-in defaults

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_OUTPUT_DIR: &str = "processed_texts";
pub const LOCAL_CONFIG_FILE: &str = "doctext.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory receiving `<input file name>.txt` outputs
    pub output_dir: PathBuf,

    /// Descend into sub-directories when an input is a directory
    pub recursive: bool,

    pub office: OfficeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            recursive: true,
            office: OfficeConfig::default(),
        }
    }
}

/// Office suite used for legacy .doc conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfficeConfig {
    /// Executable name or path of LibreOffice/OpenOffice
    pub program: PathBuf,

    /// Seconds before a conversion is killed
    pub timeout_secs: u64,
}

impl Default for OfficeConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("soffice"),
            timeout_secs: 120,
        }
    }
}

impl OfficeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load from an explicit path; the file must exist
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::load_from_str(&toml_str)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn load_from_str(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).context("Failed to parse config TOML")
    }

    /// Load from the first config file found, or fall back to defaults
    pub fn load_default() -> Result<Self> {
        match Self::default_config_path() {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load_from_path(&path)
            }
            None => {
                tracing::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        if let Ok(cwd) = std::env::current_dir() {
            candidates.push(cwd.join(LOCAL_CONFIG_FILE));
        }

        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("doctext").join("config.toml"));
        }

        candidates
    }

    fn default_config_path() -> Option<PathBuf> {
        Self::candidate_paths().into_iter().find(|path| path.is_file())
    }
}
