//! Index building orchestration.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use chrono::Utc;
use rayon::prelude::*;
use thiserror::Error;

use super::resolver::ResolutionPolicy;
use super::types::{IndexBuild, IndexStats, SkippedDocument, VaultIndex, VaultIndexEntry};
use crate::config::ResolvedConfig;
use crate::vault::{
    ScanError, ScanOptions, VaultWalker, WalkedFile, parse_document, read_document,
};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Vault scan error: {0}")]
    Scan(#[from] ScanError),
}

/// Progress callback for indexing operations.
/// Parameters: (current, total, current_path)
///
/// With parallel builds the callback runs on worker threads and `current`
/// counts completed documents, not scan order.
pub type ProgressCallback = Box<dyn Fn(usize, usize, &str) + Send + Sync>;

/// Knobs for a build, usually derived from the resolved config.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub scan: ScanOptions,
    pub resolution: ResolutionPolicy,
    /// Read and parse documents on the rayon pool.
    pub parallel: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { scan: ScanOptions::default(), resolution: ResolutionPolicy::default(), parallel: true }
    }
}

impl From<&ResolvedConfig> for BuildOptions {
    fn from(cfg: &ResolvedConfig) -> Self {
        Self {
            scan: ScanOptions::from(cfg),
            resolution: cfg.index.resolution,
            parallel: cfg.index.parallel,
        }
    }
}

/// Builder for a complete vault index snapshot.
pub struct IndexBuilder<'a> {
    vault_root: &'a Path,
    options: BuildOptions,
}

impl<'a> IndexBuilder<'a> {
    /// Create a new index builder with default options.
    pub fn new(vault_root: &'a Path) -> Self {
        Self { vault_root, options: BuildOptions::default() }
    }

    pub fn with_options(vault_root: &'a Path, options: BuildOptions) -> Self {
        Self { vault_root, options }
    }

    /// Scan the vault and build the index from scratch.
    ///
    /// Documents that cannot be read are logged, reported in
    /// [`IndexBuild::skipped`] and left out. Only a failed scan is an error.
    pub fn build(&self, progress: Option<ProgressCallback>) -> Result<IndexBuild, BuildError> {
        let start = Instant::now();

        let walker = VaultWalker::with_options(self.vault_root, self.options.scan.clone())?;
        let files = walker.walk()?;
        let total = files.len();

        // Phase 1: read and parse every document
        let done = AtomicUsize::new(0);
        let index_one = |file: &WalkedFile| {
            let result = index_note(file);
            if let Some(ref cb) = progress {
                let current = done.fetch_add(1, Ordering::Relaxed) + 1;
                cb(current, total, &file.relative_path.to_string_lossy());
            }
            result
        };
        let parsed: Vec<Result<(PathBuf, VaultIndexEntry), SkippedDocument>> =
            if self.options.parallel {
                files.par_iter().map(index_one).collect()
            } else {
                files.iter().map(index_one).collect()
            };

        let mut index = VaultIndex::new();
        let mut skipped = Vec::new();
        let mut links_indexed = 0;
        for result in parsed {
            match result {
                Ok((path, entry)) => {
                    links_indexed += entry.links.len();
                    index.insert(path, entry);
                }
                Err(skip) => {
                    // Log error but continue indexing
                    tracing::warn!("Failed to index {}: {}", skip.path.display(), skip.reason);
                    skipped.push(skip);
                }
            }
        }

        // Phase 2: resolve link targets into backlinks
        let link_stats = index.relink(self.options.resolution);

        let stats = IndexStats {
            files_found: total,
            notes_indexed: index.len(),
            notes_skipped: skipped.len(),
            links_indexed,
            links_resolved: link_stats.resolved,
            broken_links: link_stats.broken,
            ambiguous_links: link_stats.ambiguous,
            duration_ms: start.elapsed().as_millis() as u64,
            built_at: Utc::now(),
        };
        tracing::debug!(
            notes = stats.notes_indexed,
            skipped = stats.notes_skipped,
            links = stats.links_indexed,
            broken = stats.broken_links,
            "indexed {} in {}ms",
            walker.root().display(),
            stats.duration_ms
        );

        Ok(IndexBuild { index, skipped, stats })
    }
}

/// Build the index of the vault at `vault_root` with default options.
pub fn build_index(vault_root: &Path) -> Result<IndexBuild, BuildError> {
    IndexBuilder::new(vault_root).build(None)
}

/// Read and parse one document into an entry with empty backlinks.
fn index_note(file: &WalkedFile) -> Result<(PathBuf, VaultIndexEntry), SkippedDocument> {
    let content = read_document(&file.absolute_path).map_err(|e| SkippedDocument {
        path: file.absolute_path.clone(),
        reason: e.to_string(),
    })?;

    let metadata = parse_document(&content);
    let entry = VaultIndexEntry::from_metadata(metadata, &file.absolute_path);
    Ok((file.absolute_path.clone(), entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn create_test_vault() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        fs::write(
            root.join("note1.md"),
            r#"---
title: Note One
tags: [project]
---
# Note One

This links to [[note2]] and [[missing-note]]. #idea
"#,
        )
        .unwrap();

        fs::write(root.join("note2.md"), "Back to [[note1]] and [[note1|again]].\n").unwrap();

        fs::create_dir(root.join("subdir")).unwrap();
        fs::write(root.join("subdir/note3.md"), "Links to [[note1]] and [[]].\n").unwrap();

        dir
    }

    fn key(vault: &TempDir, rel: &str) -> PathBuf {
        vault.path().canonicalize().unwrap().join(rel)
    }

    #[test]
    fn test_full_build() {
        let vault = create_test_vault();
        let build = IndexBuilder::new(vault.path()).build(None).unwrap();

        assert_eq!(build.stats.files_found, 3);
        assert_eq!(build.stats.notes_indexed, 3);
        assert_eq!(build.stats.notes_skipped, 0);
        assert_eq!(build.stats.links_indexed, 6);
        assert_eq!(build.stats.links_resolved, 4);
        assert_eq!(build.stats.broken_links, 2);
        assert!(build.skipped.is_empty());
    }

    #[test]
    fn test_entries_are_indexed_correctly() {
        let vault = create_test_vault();
        let build = build_index(vault.path()).unwrap();

        let note1 = build.index.get(&key(&vault, "note1.md")).expect("note1 should exist");
        assert_eq!(note1.title, "Note One");
        assert_eq!(note1.tags, vec!["project", "idea"]);
        assert_eq!(note1.links, vec!["note2", "missing-note"]);

        let note3 = build.index.get(&key(&vault, "subdir/note3.md")).unwrap();
        assert_eq!(note3.title, "note3");
        assert_eq!(note3.links, vec!["note1", ""]);
    }

    #[test]
    fn test_backlinks_resolved() {
        let vault = create_test_vault();
        let build = build_index(vault.path()).unwrap();

        let note1 = build.index.get(&key(&vault, "note1.md")).unwrap();
        // note2 links twice but contributes a single backlink
        assert_eq!(
            note1.backlinks,
            vec![key(&vault, "note2.md"), key(&vault, "subdir/note3.md")]
        );

        let note2 = build.index.get(&key(&vault, "note2.md")).unwrap();
        assert_eq!(note2.backlinks, vec![key(&vault, "note1.md")]);

        let note3 = build.index.get(&key(&vault, "subdir/note3.md")).unwrap();
        assert!(note3.backlinks.is_empty());
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let vault = create_test_vault();
        let parallel = IndexBuilder::new(vault.path()).build(None).unwrap();
        let options = BuildOptions { parallel: false, ..BuildOptions::default() };
        let sequential = IndexBuilder::with_options(vault.path(), options).build(None).unwrap();

        assert_eq!(parallel.index, sequential.index);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let vault = create_test_vault();
        let first = build_index(vault.path()).unwrap();
        let second = build_index(vault.path()).unwrap();

        assert_eq!(first.index, second.index);
    }

    #[test]
    fn test_invalid_utf8_is_indexed_lossily() {
        let vault = create_test_vault();
        fs::write(vault.path().join("café.md"), b"Caf\xe9 notes #food [[note1]]").unwrap();

        let build = build_index(vault.path()).unwrap();

        assert_eq!(build.stats.notes_indexed, 4);
        assert!(build.skipped.is_empty());
        let entry = build.index.get(&key(&vault, "café.md")).unwrap();
        assert_eq!(entry.tags, vec!["food"]);
        let note1 = build.index.get(&key(&vault, "note1.md")).unwrap();
        assert!(note1.backlinks.contains(&key(&vault, "café.md")));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_document_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let vault = create_test_vault();
        let locked = vault.path().join("locked.md");
        fs::write(&locked, "secret").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read(&locked).is_ok() {
            // Permissions are not enforced (e.g. running as root)
            return;
        }

        let build = build_index(vault.path()).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

        assert_eq!(build.stats.files_found, 4);
        assert_eq!(build.stats.notes_indexed, 3);
        assert_eq!(build.stats.notes_skipped, 1);
        assert_eq!(build.skipped[0].path, key(&vault, "locked.md"));
        assert!(!build.index.contains(&key(&vault, "locked.md")));
    }

    #[test]
    fn test_empty_vault() {
        let dir = TempDir::new().unwrap();
        let build = build_index(dir.path()).unwrap();
        assert!(build.index.is_empty());
        assert_eq!(build.stats.files_found, 0);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let result = build_index(Path::new("/nonexistent/vault"));
        assert!(matches!(result, Err(BuildError::Scan(ScanError::MissingRoot(_)))));
    }

    #[test]
    fn test_progress_reports_every_document() {
        let vault = create_test_vault();
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let progress: ProgressCallback = Box::new(move |_, total, _| {
            assert_eq!(total, 3);
            counter.fetch_add(1, Ordering::SeqCst);
        });

        IndexBuilder::new(vault.path()).build(Some(progress)).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_resolution_policy_applies() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::create_dir_all(root.join("b")).unwrap();
        fs::write(root.join("a/dup.md"), "").unwrap();
        fs::write(root.join("b/dup.md"), "").unwrap();
        fs::write(root.join("b/src.md"), "[[dup]]").unwrap();
        let canon = root.canonicalize().unwrap();

        let build = build_index(root).unwrap();
        assert_eq!(build.stats.ambiguous_links, 1);
        assert_eq!(build.index.get(&canon.join("a/dup.md")).unwrap().backlinks.len(), 1);

        let options =
            BuildOptions { resolution: ResolutionPolicy::SameDirectory, ..Default::default() };
        let build = IndexBuilder::with_options(root, options).build(None).unwrap();
        assert!(build.index.get(&canon.join("a/dup.md")).unwrap().backlinks.is_empty());
        assert_eq!(build.index.get(&canon.join("b/dup.md")).unwrap().backlinks.len(), 1);

        let options = BuildOptions { resolution: ResolutionPolicy::Strict, ..Default::default() };
        let build = IndexBuilder::with_options(root, options).build(None).unwrap();
        assert_eq!(build.stats.broken_links, 1);
        assert!(build.index.iter().all(|(_, e)| e.backlinks.is_empty()));
    }
}
