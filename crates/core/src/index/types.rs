//! Index data types for vault documents and links.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::path::{Path, PathBuf};

use crate::vault::NoteMetadata;

/// One indexed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultIndexEntry {
    /// Declared title, or the file stem when none is declared.
    pub title: String,
    pub tags: Vec<String>,
    /// Outgoing link targets exactly as written (unresolved).
    pub links: Vec<String>,
    /// Paths of documents linking to this one, each listed once.
    pub backlinks: Vec<PathBuf>,
}

impl VaultIndexEntry {
    /// Build an entry with empty backlinks from parsed metadata.
    pub fn from_metadata(meta: NoteMetadata, path: &Path) -> Self {
        let title = if meta.title.is_empty() { file_stem(path).to_string() } else { meta.title };
        Self { title, tags: meta.tags, links: meta.links, backlinks: Vec::new() }
    }

    pub(crate) fn add_backlink(&mut self, source: &Path) -> bool {
        if self.backlinks.iter().any(|p| p == source) {
            return false;
        }
        self.backlinks.push(source.to_path_buf());
        true
    }
}

/// Mapping from absolute document path to its entry.
///
/// Iteration is ordered by path, so resolution and graph output are
/// deterministic for a given set of documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VaultIndex {
    entries: BTreeMap<PathBuf, VaultIndexEntry>,
}

impl VaultIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, path: &Path) -> Option<&VaultIndexEntry> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, PathBuf, VaultIndexEntry> {
        self.entries.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.keys().map(PathBuf::as_path)
    }

    /// Insert or replace an entry. Backlinks are not re-derived.
    pub fn insert(&mut self, path: PathBuf, entry: VaultIndexEntry) -> Option<VaultIndexEntry> {
        self.entries.insert(path, entry)
    }

    pub(crate) fn remove(&mut self, path: &Path) -> Option<VaultIndexEntry> {
        self.entries.remove(path)
    }

    pub(crate) fn get_mut(&mut self, path: &Path) -> Option<&mut VaultIndexEntry> {
        self.entries.get_mut(path)
    }

    pub(crate) fn entries_mut(
        &mut self,
    ) -> btree_map::IterMut<'_, PathBuf, VaultIndexEntry> {
        self.entries.iter_mut()
    }
}

impl<'a> IntoIterator for &'a VaultIndex {
    type Item = (&'a PathBuf, &'a VaultIndexEntry);
    type IntoIter = btree_map::Iter<'a, PathBuf, VaultIndexEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A document that was found by the scan but could not be indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedDocument {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome counts of one backlink pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LinkStats {
    /// Links that resolved to a document.
    pub resolved: usize,
    /// Links that resolved to nothing.
    pub broken: usize,
    /// Links whose target name matched more than one document.
    pub ambiguous: usize,
}

/// Statistics from an indexing operation.
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    /// Number of files discovered.
    pub files_found: usize,
    /// Number of notes indexed.
    pub notes_indexed: usize,
    /// Number of notes skipped due to errors.
    pub notes_skipped: usize,
    /// Number of raw links recorded.
    pub links_indexed: usize,
    pub links_resolved: usize,
    pub broken_links: usize,
    pub ambiguous_links: usize,
    /// Indexing duration in milliseconds.
    pub duration_ms: u64,
    pub built_at: DateTime<Utc>,
}

/// A completed index build: the snapshot plus whatever was left out of it.
#[derive(Debug, Clone, Serialize)]
pub struct IndexBuild {
    pub index: VaultIndex,
    pub skipped: Vec<SkippedDocument>,
    pub stats: IndexStats,
}

/// File name without its extension, as used for link resolution.
pub fn file_stem(path: &Path) -> &str {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or_default()
}
