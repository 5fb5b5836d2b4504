//! Frontmatter parsing from markdown documents.

use super::types::{Frontmatter, ParsedDocument};
use thiserror::Error;

/// Errors that can occur during frontmatter parsing.
#[derive(Debug, Error)]
pub enum FrontmatterParseError {
    #[error("invalid YAML frontmatter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
}

const DELIMITER: &str = "---";

/// Split a document into its raw frontmatter block and body.
///
/// The block must open on the very first line of the document:
/// ```markdown
/// ---
/// key: value
/// ---
/// # Document content
/// ```
/// Without a closing `---` line the whole text is body. A leading byte
/// order mark is dropped first.
pub fn split(content: &str) -> (Option<&str>, &str) {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    match lines.next() {
        Some(first) if first.trim_end() == DELIMITER => {}
        _ => return (None, content),
    }

    let yaml_start = first_line_len(content);
    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            let yaml = &content[yaml_start..offset];
            let body = &content[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    (None, content)
}

fn first_line_len(content: &str) -> usize {
    content.find('\n').map_or(content.len(), |i| i + 1)
}

/// Parse frontmatter from markdown content.
///
/// Fails only when a delimited block exists and is not a YAML mapping.
pub fn parse(content: &str) -> Result<ParsedDocument<'_>, FrontmatterParseError> {
    let (raw, body) = split(content);

    let frontmatter = match raw {
        None => None,
        Some(yaml) if yaml.trim().is_empty() => Some(Frontmatter::default()),
        Some(yaml) => Some(serde_yaml::from_str::<Frontmatter>(yaml)?),
    };

    Ok(ParsedDocument { frontmatter, body })
}

/// Parse frontmatter, degrading a malformed block to an empty one.
///
/// The body is still everything after the block.
pub fn parse_lenient(content: &str) -> ParsedDocument<'_> {
    match parse(content) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::trace!("ignoring malformed frontmatter: {}", e);
            let (_, body) = split(content);
            ParsedDocument { frontmatter: Some(Frontmatter::default()), body }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_no_frontmatter() {
        let content = "# Hello\n\nSome content";
        let result = parse(content).unwrap();
        assert!(result.frontmatter.is_none());
        assert_eq!(result.body, content);
    }

    #[test]
    fn parse_simple_frontmatter() {
        let content = "---\ntitle: Hello\n---\n# Content";
        let result = parse(content).unwrap();
        let fm = result.frontmatter.unwrap();
        assert_eq!(fm.title(), Some("Hello"));
        assert_eq!(result.body, "# Content");
    }

    #[test]
    fn parse_frontmatter_with_multiple_fields() {
        let content =
            "---\ntitle: Test\ndate: 2024-01-15\ntags:\n  - rust\n  - cli\n---\n\nBody";
        let result = parse(content).unwrap();
        let fm = result.frontmatter.unwrap();
        assert_eq!(fm.title(), Some("Test"));
        assert_eq!(fm.tags(), vec!["rust", "cli"]);
        assert_eq!(result.body, "\nBody");
    }

    #[test]
    fn parse_empty_frontmatter() {
        let content = "---\n---\n# Content";
        let result = parse(content).unwrap();
        assert!(result.frontmatter.unwrap().fields.is_empty());
        assert_eq!(result.body, "# Content");
    }

    #[test]
    fn unclosed_block_is_body() {
        let content = "---\ntitle: Nope\n# Content";
        let (raw, body) = split(content);
        assert!(raw.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn block_must_open_the_document() {
        let content = "\n---\ntitle: Late\n---\nBody";
        let (raw, body) = split(content);
        assert!(raw.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn crlf_delimiters() {
        let content = "---\r\ntitle: Windows\r\n---\r\nBody\r\n";
        let result = parse(content).unwrap();
        assert_eq!(result.frontmatter.unwrap().title(), Some("Windows"));
        assert_eq!(result.body, "Body\r\n");
    }

    #[test]
    fn byte_order_mark_before_block() {
        let content = "\u{feff}---\ntitle: T\ntags: [a]\n---\nbody";
        let result = parse(content).unwrap();
        let fm = result.frontmatter.unwrap();
        assert_eq!(fm.title(), Some("T"));
        assert_eq!(fm.tags(), vec!["a"]);
        assert_eq!(result.body, "body");

        let (raw, body) = split("\u{feff}plain text");
        assert!(raw.is_none());
        assert_eq!(body, "plain text");
    }

    #[test]
    fn block_closed_at_end_of_file() {
        let content = "---\ntitle: Only\n---";
        let result = parse(content).unwrap();
        assert_eq!(result.frontmatter.unwrap().title(), Some("Only"));
        assert_eq!(result.body, "");
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        assert!(parse(content).is_err());
    }

    #[test]
    fn lenient_parse_keeps_body() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        let result = parse_lenient(content);
        assert!(result.frontmatter.unwrap().fields.is_empty());
        assert_eq!(result.body, "Body");
    }

    #[test]
    fn tags_single_string() {
        let content = "---\ntags: solo\n---\n";
        let fm = parse(content).unwrap().frontmatter.unwrap();
        assert_eq!(fm.tags(), vec!["solo"]);
    }

    #[test]
    fn tags_of_unsupported_shape_are_empty() {
        let content = "---\ntags:\n  nested: value\ntitle: 42\n---\n";
        let fm = parse(content).unwrap().frontmatter.unwrap();
        assert!(fm.tags().is_empty());
        assert_eq!(fm.title(), None);
    }
}
