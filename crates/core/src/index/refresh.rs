//! Backlink derivation and single-document refresh of an existing index.
//!
//! A full build calls [`VaultIndex::relink`] once after parsing. Editors that
//! already hold an index can patch one document with
//! [`VaultIndex::upsert_document`] or [`VaultIndex::remove_document`] instead
//! of rescanning the vault. Both re-derive every backlink in memory, since
//! adding or removing a document can change what other documents' links
//! resolve to.

use std::io;
use std::path::{Path, PathBuf};

use super::resolver::{NameResolver, Resolution, ResolutionPolicy};
use super::types::{LinkStats, VaultIndex, VaultIndexEntry};
use crate::vault::{parse_document, read_document};

impl VaultIndex {
    /// Clear and recompute all backlinks from the recorded links.
    pub fn relink(&mut self, policy: ResolutionPolicy) -> LinkStats {
        let mut stats = LinkStats::default();

        let pairs: Vec<(PathBuf, PathBuf)> = {
            let resolver = NameResolver::for_index(self, policy);
            let mut pairs = Vec::new();
            for (source, entry) in self.iter() {
                for target in &entry.links {
                    let resolution = resolver.resolve(target, source);
                    if resolution.is_ambiguous() {
                        stats.ambiguous += 1;
                    }
                    match resolution {
                        Resolution::Resolved { path }
                        | Resolution::Ambiguous { chosen: Some(path), .. } => {
                            stats.resolved += 1;
                            pairs.push((path, source.clone()));
                        }
                        Resolution::Ambiguous { chosen: None, .. } | Resolution::Unresolved => {
                            stats.broken += 1;
                        }
                    }
                }
            }
            pairs
        };

        for (_, entry) in self.entries_mut() {
            entry.backlinks.clear();
        }
        for (target, source) in pairs {
            if let Some(entry) = self.get_mut(&target) {
                entry.add_backlink(&source);
            }
        }

        stats
    }

    /// Re-parse one document from `content` and re-derive backlinks.
    pub fn upsert_document(
        &mut self,
        path: PathBuf,
        content: &str,
        policy: ResolutionPolicy,
    ) -> LinkStats {
        let entry = VaultIndexEntry::from_metadata(parse_document(content), &path);
        self.insert(path, entry);
        self.relink(policy)
    }

    /// Drop one document and re-derive backlinks.
    pub fn remove_document(
        &mut self,
        path: &Path,
        policy: ResolutionPolicy,
    ) -> Option<VaultIndexEntry> {
        let removed = self.remove(path)?;
        self.relink(policy);
        Some(removed)
    }

    /// Refresh one document from disk: re-parse it, or drop it when it no
    /// longer exists.
    pub fn reload_document(&mut self, path: &Path, policy: ResolutionPolicy) -> io::Result<()> {
        match read_document(path) {
            Ok(content) => {
                self.upsert_document(path.to_path_buf(), &content, policy);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.remove_document(path, policy);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
