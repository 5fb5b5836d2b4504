//! Vault indexing and link-resolution engine.
//!
//! Scans a directory of markdown documents, extracts titles, tags and
//! wikilinks, resolves link targets to documents and derives the backlink
//! graph over the whole vault. Substring search runs over the same scan.
//!
//! ```no_run
//! use notegraph_core::{build_index, parse_document, search};
//! use std::path::Path;
//!
//! let meta = parse_document("Hello #work, see [[other|the other note]]");
//! assert_eq!(meta.links, vec!["other"]);
//!
//! let build = build_index(Path::new("/path/to/vault")).unwrap();
//! for (path, entry) in build.index.iter() {
//!     println!("{} <- {} backlinks", path.display(), entry.backlinks.len());
//! }
//!
//! let hits = search(Path::new("/path/to/vault"), "hello").unwrap();
//! ```

pub mod config;
pub mod frontmatter;
pub mod index;
pub mod vault;

pub use index::{IndexBuild, VaultIndex, VaultIndexEntry, build_index, search};
pub use vault::{NoteMetadata, parse_document};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
