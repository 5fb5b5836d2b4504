use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::index::ResolutionPolicy;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    pub vault_root: String,
    /// Document extension without the leading dot.
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Entries whose name starts with this prefix are skipped with their subtree.
    #[serde(default = "default_hidden_prefix")]
    pub hidden_prefix: String,
    /// Folders to exclude from scanning (relative to vault_root).
    #[serde(default)]
    pub excluded_folders: Vec<String>,
}

/// How the index is built and how link targets are resolved.
#[derive(Debug, Deserialize, Clone)]
pub struct IndexConfig {
    #[serde(default)]
    pub resolution: ResolutionPolicy,
    /// Parse documents on the rayon pool (default: true).
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self { resolution: ResolutionPolicy::default(), parallel: default_parallel() }
    }
}

fn default_parallel() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

pub(crate) fn default_extension() -> String {
    "md".to_string()
}

pub(crate) fn default_hidden_prefix() -> String {
    ".".to_string()
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub active_profile: String,
    pub vault_root: PathBuf,
    pub extension: String,
    pub hidden_prefix: String,
    /// Folders to exclude from scanning (expanded, relative or absolute).
    pub excluded_folders: Vec<PathBuf>,
    pub index: IndexConfig,
    pub logging: LoggingConfig,
}

impl ResolvedConfig {
    /// Default configuration for a vault given directly, without a config file.
    pub fn for_vault(vault_root: &Path) -> Self {
        Self {
            active_profile: "(cli)".to_string(),
            vault_root: vault_root.to_path_buf(),
            extension: default_extension(),
            hidden_prefix: default_hidden_prefix(),
            excluded_folders: Vec::new(),
            index: IndexConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
