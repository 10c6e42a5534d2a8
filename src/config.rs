use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PatchsetError, Result};

/// Config filename at the data root.
const CONFIG_FILE: &str = "patchset.toml";
/// Per-source collected artifacts live under `collected/<source>/`.
const COLLECTED_DIR: &str = "collected";
/// Transformed datasets live under `transformed/<source>.jsonl`.
const TRANSFORMED_DIR: &str = "transformed";

/// Data-root layout resolved from a base directory.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base directory holding collected artifacts and datasets.
    pub data_root: PathBuf,
    /// Path to `collected/`.
    pub collected_dir: PathBuf,
    /// Path to `transformed/`.
    pub transformed_dir: PathBuf,
    /// Path to the config file.
    pub config_path: PathBuf,
    /// User settings loaded from patchset.toml.
    pub settings: Settings,
}

/// User-configurable settings from patchset.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Filter configuration.
    pub filters: FilterSettings,
    /// Diff computation configuration.
    pub diff: DiffSettings,
    /// Input limits.
    pub limits: LimitSettings,
}

/// Filter-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Dotted extensions accepted by the language filter.
    pub languages: Vec<String>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            languages: vec![".c".into(), ".h".into()],
        }
    }
}

/// Diff computation settings for sources shipping whole-file pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffSettings {
    /// Context lines kept around each change block.
    pub context_lines: usize,
    /// Whether to strip comments before diffing file pairs.
    pub strip_comments: bool,
}

impl Default for DiffSettings {
    fn default() -> Self {
        Self {
            context_lines: 10,
            strip_comments: true,
        }
    }
}

/// Input size limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitSettings {
    /// Maximum artifact size in MB (0 = unlimited).
    pub max_file_size_mb: u32,
}

impl Default for LimitSettings {
    fn default() -> Self {
        Self {
            max_file_size_mb: 10,
        }
    }
}

impl Settings {
    /// Check an artifact against the size limit.
    #[must_use]
    pub fn is_file_too_large(&self, size_bytes: u64) -> bool {
        let max_bytes = u64::from(self.limits.max_file_size_mb) * 1024 * 1024;
        max_bytes > 0 && size_bytes > max_bytes
    }
}

impl Config {
    /// Create config for a given data root.
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        let data_root = data_root.into();
        let collected_dir = data_root.join(COLLECTED_DIR);
        let transformed_dir = data_root.join(TRANSFORMED_DIR);
        let config_path = data_root.join(CONFIG_FILE);

        let settings = Self::load_settings(&config_path).unwrap_or_default();

        Self {
            data_root,
            collected_dir,
            transformed_dir,
            config_path,
            settings,
        }
    }

    /// Create config from the current working directory.
    pub fn from_cwd() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| PatchsetError::Config(format!("cannot get cwd: {e}")))?;
        Ok(Self::new(cwd))
    }

    /// Load settings from patchset.toml if it exists.
    fn load_settings(config_path: &Path) -> Option<Settings> {
        if !config_path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(config_path).ok()?;
        toml::from_str(&content).ok()
    }

    /// Save current settings to patchset.toml.
    pub fn save_settings(&self) -> Result<()> {
        let content = toml::to_string_pretty(&self.settings)
            .map_err(|e| PatchsetError::Config(format!("failed to serialize settings: {e}")))?;
        std::fs::write(&self.config_path, content)?;
        Ok(())
    }

    /// Ensure the transformed output directory exists.
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.transformed_dir)?;
        Ok(())
    }

    /// Collected artifacts directory for one source.
    #[must_use]
    pub fn collected_path(&self, source: &str) -> PathBuf {
        self.collected_dir.join(source)
    }

    /// Transformed dataset path for one source.
    #[must_use]
    pub fn transformed_path(&self, source: &str) -> PathBuf {
        self.transformed_dir.join(format!("{source}.jsonl"))
    }

    /// Filtered dataset path for one source.
    #[must_use]
    pub fn filtered_path(&self, source: &str) -> PathBuf {
        self.transformed_dir.join(format!("{source}.filtered.jsonl"))
    }
}
