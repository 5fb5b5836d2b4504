//! In-memory vault index: documents, links and backlinks.
//!
//! This module provides:
//! - A two-phase builder (parse every document, then resolve links)
//! - Name resolution of wikilink targets with an explicit tie-break policy
//! - Single-document refresh of an existing index
//! - Read-only views for tags, graph, backlinks and broken links
//! - Substring search over the vault
//!
//! # Example
//!
//! ```no_run
//! use notegraph_core::index::{IndexBuilder, ResolutionPolicy};
//! use std::path::Path;
//!
//! let build = IndexBuilder::new(Path::new("/path/to/vault")).build(None).unwrap();
//! for skipped in &build.skipped {
//!     eprintln!("skipped {}: {}", skipped.path.display(), skipped.reason);
//! }
//!
//! let graph = build.index.graph(ResolutionPolicy::default());
//! println!("{} nodes, {} edges", graph.nodes.len(), graph.edges.len());
//! ```

pub mod builder;
pub mod refresh;
pub mod resolver;
pub mod search;
pub mod types;
pub mod views;

pub use builder::{BuildError, BuildOptions, IndexBuilder, ProgressCallback, build_index};
pub use resolver::{NameResolver, Resolution, ResolutionPolicy};
pub use search::{
    CONTENT_WEIGHT, FILENAME_WEIGHT, SearchEngine, SearchError, SearchQuery, SearchResult,
    search,
};
pub use types::{
    IndexBuild, IndexStats, LinkStats, SkippedDocument, VaultIndex, VaultIndexEntry,
    file_stem,
};
pub use views::{GraphEdge, GraphNode, LinkGraph, OutgoingLink, UnresolvedLink};
