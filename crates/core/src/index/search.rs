//! Substring search over vault documents.
//!
//! Search rescans the vault on every call and does not use a built index:
//! - File name match: the query appears in the document's file name
//! - Content match: the query appears anywhere in the document text
//!
//! Both checks are case-insensitive and their weights add up.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::vault::{ScanError, ScanOptions, VaultWalker, WalkedFile, read_document};

/// Score for a query found in the file name.
pub const FILENAME_WEIGHT: u32 = 10;
/// Score for a query found in the document content.
pub const CONTENT_WEIGHT: u32 = 5;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Vault scan error: {0}")]
    Scan(#[from] ScanError),
}

/// Search query parameters.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// Text to search for in file names and content.
    pub text: String,
    /// Maximum results to return.
    pub limit: Option<usize>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), limit: None }
    }
}

/// A search result with relevance information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub path: PathBuf,
    /// File name of the matching document.
    pub title: String,
    /// Relevance score (higher = more relevant).
    pub score: u32,
}

/// Search engine over a vault directory.
pub struct SearchEngine<'a> {
    vault_root: &'a Path,
    scan: ScanOptions,
}

impl<'a> SearchEngine<'a> {
    /// Create a new search engine with default scan options.
    pub fn new(vault_root: &'a Path) -> Self {
        Self { vault_root, scan: ScanOptions::default() }
    }

    pub fn with_options(vault_root: &'a Path, scan: ScanOptions) -> Self {
        Self { vault_root, scan }
    }

    /// Execute a search query.
    ///
    /// An empty query returns no results without touching the vault.
    /// Results are sorted by descending score; equal scores keep scan order.
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, SearchError> {
        if query.text.is_empty() {
            return Ok(Vec::new());
        }

        let walker = VaultWalker::with_options(self.vault_root, self.scan.clone())?;
        let files = walker.walk()?;
        let needle = query.text.to_lowercase();

        let mut results: Vec<SearchResult> =
            files.par_iter().filter_map(|file| score_file(file, &needle)).collect();

        results.sort_by(|a, b| b.score.cmp(&a.score));

        if let Some(limit) = query.limit {
            results.truncate(limit);
        }

        tracing::debug!("search {:?}: {} hits in {} documents", query.text, results.len(), files.len());
        Ok(results)
    }
}

/// Search the vault at `vault_root` with default options.
pub fn search(vault_root: &Path, query: &str) -> Result<Vec<SearchResult>, SearchError> {
    SearchEngine::new(vault_root).search(&SearchQuery::new(query))
}

/// Score one document against an already lower-cased needle.
fn score_file(file: &WalkedFile, needle: &str) -> Option<SearchResult> {
    let name = file
        .absolute_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let mut score = 0;
    if name.to_lowercase().contains(needle) {
        score += FILENAME_WEIGHT;
    }

    match read_document(&file.absolute_path) {
        Ok(content) => {
            if content.to_lowercase().contains(needle) {
                score += CONTENT_WEIGHT;
            }
        }
        Err(e) => {
            // Unreadable content simply does not match
            tracing::debug!("search skipped content of {}: {}", file.absolute_path.display(), e);
        }
    }

    (score > 0).then(|| SearchResult { path: file.absolute_path.clone(), title: name, score })
}
