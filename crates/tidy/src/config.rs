use std::collections::HashSet;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use crate::error::TidyError;
use crate::naming;

/// Default naming template
pub const DEFAULT_PATTERN: &str = "{artist} - {title}";

/// Options for a single run of the renamer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunOptions {
    /// Root directory to scan for audio files
    pub root: Option<PathBuf>,
    /// Descend into subdirectories
    pub recursive: bool,
    /// Naming template, e.g. "{artist} - {title}"
    pub pattern: String,
    /// Compute and report the plan without touching the filesystem
    pub dry_run: bool,
    /// Delete files that fail the playability check
    pub delete_bad: bool,
    /// File extensions (without the dot) that count as audio files
    pub extensions: Vec<String>,
    /// Path to the ffprobe binary used as the external decoder
    pub ffprobe_bin: PathBuf,
    /// Consult the external decoder when it is installed
    pub use_ffprobe: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::default_config()
    }
}

impl RunOptions {
    /// Create a default configuration with sensible values
    pub fn default_config() -> Self {
        Self {
            root: None,
            recursive: false,
            pattern: DEFAULT_PATTERN.to_string(),
            dry_run: false,
            delete_bad: false,
            extensions: vec!["mp3".to_string()],
            ffprobe_bin: PathBuf::from("ffprobe"),
            use_ffprobe: true,
        }
    }

    /// Load configuration from a file, or return defaults if path is None or file doesn't exist
    pub fn load_config(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default_config();

        if let Some(config_path) = path {
            if config_path.exists() {
                let content = std::fs::read_to_string(config_path)
                    .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

                // TOML by extension, JSON otherwise
                if config_path.extension().and_then(|s| s.to_str()) == Some("toml") {
                    config = toml::from_str(&content)
                        .with_context(|| format!("Failed to parse TOML config: {}", config_path.display()))?;
                } else {
                    config = serde_json::from_str(&content)
                        .with_context(|| format!("Failed to parse JSON config: {}", config_path.display()))?;
                }
            }
        }

        Ok(config)
    }

    /// Check the options and normalize the extension list.
    ///
    /// Returns the root directory on success.
    pub fn validate(&mut self) -> Result<PathBuf, TidyError> {
        let root = self.root.clone().ok_or(TidyError::NoRoot)?;

        if self.pattern.trim().is_empty() {
            return Err(TidyError::EmptyPattern);
        }

        let mut seen = HashSet::new();
        self.extensions = self
            .extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty() && seen.insert(e.clone()))
            .collect();
        if self.extensions.is_empty() {
            return Err(TidyError::NoExtensions);
        }

        for token in naming::unknown_placeholders(&self.pattern) {
            log::warn!("Unrecognized placeholder {} in pattern, it will be kept literally", token);
        }

        Ok(root)
    }
}
