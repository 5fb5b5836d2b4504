//! Vault document discovery and metadata extraction.
//!
//! This module provides the directory walker that enumerates documents and
//! the pure parser that turns one document's text into [`NoteMetadata`].

pub mod extractor;
pub mod walker;

pub use extractor::{NoteMetadata, extract_inline_tags, extract_links, parse_document};
pub use walker::{ScanError, ScanOptions, VaultWalker, WalkedFile, read_document};
