//! Frontmatter splitting and parsing.
//!
//! A document may open with a YAML block delimited by `---` lines. Only the
//! `title` and `tags` keys carry meaning for the index; every other key is
//! kept in [`Frontmatter::fields`] untouched.

pub mod parser;
pub mod types;

pub use parser::{FrontmatterParseError, parse, parse_lenient, split};
pub use types::{Frontmatter, ParsedDocument};
