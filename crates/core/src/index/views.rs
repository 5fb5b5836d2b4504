//! Read-only projections of a built index for presentation surfaces.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use super::resolver::{NameResolver, Resolution, ResolutionPolicy};
use super::types::{VaultIndex, file_stem};

/// A node of the link graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: PathBuf,
    pub name: String,
}

/// A resolved link from `source` to `target`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct GraphEdge {
    pub source: PathBuf,
    pub target: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// One raw outgoing link and what it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingLink {
    pub target: String,
    pub resolution: Resolution,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedLink {
    pub source: PathBuf,
    pub target: String,
}

impl VaultIndex {
    /// Every tag with the documents carrying it, both sorted.
    pub fn tag_summary(&self) -> BTreeMap<String, Vec<PathBuf>> {
        let mut tags: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
        for (path, entry) in self {
            for tag in &entry.tags {
                tags.entry(tag.clone()).or_default().push(path.clone());
            }
        }
        tags
    }

    /// Nodes for every document and one edge per distinct resolved link.
    pub fn graph(&self, policy: ResolutionPolicy) -> LinkGraph {
        let resolver = NameResolver::for_index(self, policy);

        let nodes = self
            .iter()
            .map(|(path, entry)| GraphNode { id: path.clone(), name: entry.title.clone() })
            .collect();

        let mut edges = BTreeSet::new();
        for (source, entry) in self {
            for target in &entry.links {
                if let Some(target) = resolver.resolve_path(target, source) {
                    edges.insert(GraphEdge { source: source.clone(), target: target.to_path_buf() });
                }
            }
        }

        LinkGraph { nodes, edges: edges.into_iter().collect() }
    }

    /// Sources linking to `path`; empty for unknown documents.
    pub fn backlinks(&self, path: &Path) -> &[PathBuf] {
        self.get(path).map(|e| e.backlinks.as_slice()).unwrap_or(&[])
    }

    /// The raw links of `path` with their resolution, in document order.
    pub fn outgoing(&self, path: &Path, policy: ResolutionPolicy) -> Vec<OutgoingLink> {
        let Some(entry) = self.get(path) else {
            return Vec::new();
        };
        let resolver = NameResolver::for_index(self, policy);
        entry
            .links
            .iter()
            .map(|target| OutgoingLink {
                target: target.clone(),
                resolution: resolver.resolve(target, path),
            })
            .collect()
    }

    /// Documents with neither incoming nor outgoing resolved links.
    ///
    /// Both directions are resolved under `policy`, so the answer does not
    /// depend on the policy the stored backlinks were derived with.
    pub fn orphans(&self, policy: ResolutionPolicy) -> Vec<&Path> {
        let resolver = NameResolver::for_index(self, policy);
        let mut linked: HashSet<&Path> = HashSet::new();
        for (source, entry) in self {
            for target in &entry.links {
                if let Some(target) = resolver.resolve_path(target, source) {
                    linked.insert(target);
                    linked.insert(source.as_path());
                }
            }
        }
        self.paths().filter(|p| !linked.contains(p)).collect()
    }

    /// Links whose target does not resolve, in path then document order.
    pub fn unresolved_links(&self, policy: ResolutionPolicy) -> Vec<UnresolvedLink> {
        let resolver = NameResolver::for_index(self, policy);
        let mut unresolved = Vec::new();
        for (source, entry) in self {
            for target in &entry.links {
                if resolver.resolve_path(target, source).is_none() {
                    unresolved.push(UnresolvedLink { source: source.clone(), target: target.clone() });
                }
            }
        }
        unresolved
    }

    /// Documents whose file stem is exactly `name`.
    pub fn find_by_name(&self, name: &str) -> Vec<&Path> {
        self.paths().filter(|p| file_stem(p) == name).collect()
    }
}
