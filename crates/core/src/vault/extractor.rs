//! Note content extraction: title, tags and wikilinks.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::frontmatter;

/// Metadata extracted from one document's raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteMetadata {
    /// Declared `title:` from frontmatter, empty when absent.
    pub title: String,
    /// Frontmatter tags first, then novel inline `#tags`. No duplicates.
    pub tags: Vec<String>,
    /// Raw wikilink targets in order of appearance, duplicates kept.
    pub links: Vec<String>,
}

// Matches [[target]] or [[target|alias]], shortest span, single line
static WIKILINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[(.*?)\]\]").unwrap());

// A '#' at the start of the body or after whitespace
static INLINE_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)#([A-Za-z0-9/_-]+)").unwrap());

/// Extract note metadata from raw document text. Performs no I/O.
pub fn parse_document(content: &str) -> NoteMetadata {
    let parsed = frontmatter::parse_lenient(content);

    let (title, declared_tags) = match &parsed.frontmatter {
        Some(fm) => (fm.title().unwrap_or_default().to_string(), fm.tags()),
        None => (String::new(), Vec::new()),
    };

    let mut tags = Vec::new();
    for tag in declared_tags {
        push_unique(&mut tags, tag);
    }
    for tag in extract_inline_tags(parsed.body) {
        push_unique(&mut tags, tag);
    }

    NoteMetadata { title, tags, links: extract_links(parsed.body) }
}

/// Wikilink targets in order, with any `|alias` suffix dropped.
///
/// `[[]]` yields an empty target.
pub fn extract_links(body: &str) -> Vec<String> {
    WIKILINK_RE
        .captures_iter(body)
        .map(|cap| {
            let inner = cap.get(1).map_or("", |m| m.as_str());
            inner.split('|').next().unwrap_or_default().to_string()
        })
        .collect()
}

/// Inline `#tag` names in order of appearance, duplicates kept.
pub fn extract_inline_tags(body: &str) -> Vec<String> {
    INLINE_TAG_RE
        .captures_iter(body)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

fn push_unique(tags: &mut Vec<String>, tag: String) {
    if !tags.contains(&tag) {
        tags.push(tag);
    }
}
