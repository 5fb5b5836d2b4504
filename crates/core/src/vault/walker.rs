//! Recursive vault directory walker.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::ResolvedConfig;
use crate::config::types::{default_extension, default_hidden_prefix};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("vault root does not exist: {0}")]
    MissingRoot(String),

    #[error("failed to list vault directory {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: walkdir::Error,
    },
}

/// Which entries a scan picks up.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Document extension without the leading dot (case-sensitive).
    pub extension: String,
    /// Entries whose name starts with this prefix are skipped with their subtree.
    pub hidden_prefix: String,
    /// Folders to exclude, relative to the root or absolute under it.
    pub excluded_folders: Vec<PathBuf>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            hidden_prefix: default_hidden_prefix(),
            excluded_folders: Vec::new(),
        }
    }
}

impl From<&ResolvedConfig> for ScanOptions {
    fn from(cfg: &ResolvedConfig) -> Self {
        Self {
            extension: cfg.extension.clone(),
            hidden_prefix: cfg.hidden_prefix.clone(),
            excluded_folders: cfg.excluded_folders.clone(),
        }
    }
}

/// A discovered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedFile {
    /// Absolute path to the file. This is the document identity.
    pub absolute_path: PathBuf,
    /// Path relative to vault root.
    pub relative_path: PathBuf,
}

/// Walker for discovering documents in a vault.
#[derive(Debug)]
pub struct VaultWalker {
    root: PathBuf,
    options: ScanOptions,
}

impl VaultWalker {
    /// Create a new walker for the given vault root with default options.
    pub fn new(root: &Path) -> Result<Self, ScanError> {
        Self::with_options(root, ScanOptions::default())
    }

    /// Create a new walker with explicit scan options.
    ///
    /// The root is canonicalized so every produced path is absolute.
    pub fn with_options(root: &Path, options: ScanOptions) -> Result<Self, ScanError> {
        let root = root
            .canonicalize()
            .map_err(|_| ScanError::MissingRoot(root.display().to_string()))?;

        if !root.is_dir() {
            return Err(ScanError::MissingRoot(root.display().to_string()));
        }

        // Normalize exclusions to be relative to root
        let excluded_folders = options
            .excluded_folders
            .into_iter()
            .map(|p| {
                if p.is_absolute() {
                    p.strip_prefix(&root).map(Path::to_path_buf).unwrap_or(p)
                } else {
                    p
                }
            })
            .collect();

        Ok(Self { root, options: ScanOptions { excluded_folders, ..options } })
    }

    /// Walk the vault and return all matching documents, sorted by relative path.
    ///
    /// Any directory that cannot be listed aborts the walk.
    pub fn walk(&self) -> Result<Vec<WalkedFile>, ScanError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !self.is_excluded(e))
        {
            let entry = entry.map_err(|e| ScanError::Unreadable {
                path: e
                    .path()
                    .unwrap_or(&self.root)
                    .display()
                    .to_string(),
                source: e,
            })?;

            // Symlinked files count; symlinked directories are not descended into
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file || !self.is_document(entry.path()) {
                continue;
            }

            let path = entry.path();
            let relative_path =
                path.strip_prefix(&self.root).unwrap_or(path).to_path_buf();

            files.push(WalkedFile { absolute_path: path.to_path_buf(), relative_path });
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        tracing::debug!("scanned {}: {} documents", self.root.display(), files.len());
        Ok(files)
    }

    /// Check if an entry should be excluded from walking.
    fn is_excluded(&self, entry: &walkdir::DirEntry) -> bool {
        // Never filter the root directory (depth 0)
        if entry.depth() == 0 {
            return false;
        }

        let name = entry.file_name().to_string_lossy();
        let prefix = &self.options.hidden_prefix;
        if !prefix.is_empty() && name.starts_with(prefix.as_str()) {
            return true;
        }

        if !self.options.excluded_folders.is_empty()
            && let Ok(relative) = entry.path().strip_prefix(&self.root)
        {
            return self
                .options
                .excluded_folders
                .iter()
                .any(|excluded| relative.starts_with(excluded));
        }

        false
    }

    fn is_document(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == self.options.extension)
    }

    /// Get the vault root path.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Read a document as text. Invalid UTF-8 sequences become U+FFFD, so
/// only genuine I/O failures are errors.
pub fn read_document(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
