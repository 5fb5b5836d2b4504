//! Wikilink target resolution.
//!
//! A target names a document by its file stem: `[[meeting]]` resolves to
//! `.../meeting.md` wherever it lives in the vault. Stems are compared
//! exactly, without case folding. When several documents share a stem the
//! configured [`ResolutionPolicy`] decides.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::types::{VaultIndex, file_stem};

/// Tie-break rule for targets matching more than one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionPolicy {
    /// Pick the candidate with the smallest path.
    #[default]
    #[serde(alias = "first-match")]
    Lexicographic,
    /// Prefer a candidate in the linking document's directory, else lexicographic.
    SameDirectory,
    /// Ambiguous targets resolve to nothing.
    Strict,
}

impl ResolutionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lexicographic => "lexicographic",
            Self::SameDirectory => "same-directory",
            Self::Strict => "strict",
        }
    }
}

impl fmt::Display for ResolutionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolutionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "lexicographic" | "first-match" => Ok(Self::Lexicographic),
            "same-directory" | "same-dir" => Ok(Self::SameDirectory),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown resolution policy '{other}'")),
        }
    }
}

/// Outcome of resolving one link target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Resolution {
    Resolved {
        path: PathBuf,
    },
    /// More than one document carries the target name.
    Ambiguous {
        candidates: Vec<PathBuf>,
        /// `None` under [`ResolutionPolicy::Strict`].
        chosen: Option<PathBuf>,
    },
    Unresolved,
}

impl Resolution {
    /// The document the link points at, if any.
    pub fn target(&self) -> Option<&Path> {
        match self {
            Self::Resolved { path } => Some(path),
            Self::Ambiguous { chosen, .. } => chosen.as_deref(),
            Self::Unresolved => None,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous { .. })
    }
}

/// Stem lookup over a fixed set of documents.
#[derive(Debug)]
pub struct NameResolver<'a> {
    by_stem: HashMap<&'a str, Vec<&'a Path>>,
    policy: ResolutionPolicy,
}

impl<'a> NameResolver<'a> {
    pub fn new<I>(paths: I, policy: ResolutionPolicy) -> Self
    where
        I: IntoIterator<Item = &'a Path>,
    {
        let mut by_stem: HashMap<&'a str, Vec<&'a Path>> = HashMap::new();
        for path in paths {
            let stem = file_stem(path);
            if !stem.is_empty() {
                by_stem.entry(stem).or_default().push(path);
            }
        }
        for candidates in by_stem.values_mut() {
            candidates.sort();
            candidates.dedup();
        }
        Self { by_stem, policy }
    }

    /// Resolver over every document of an index.
    pub fn for_index(index: &'a VaultIndex, policy: ResolutionPolicy) -> Self {
        Self::new(index.paths(), policy)
    }

    pub fn policy(&self) -> ResolutionPolicy {
        self.policy
    }

    /// All documents whose stem equals `name`, sorted by path.
    pub fn candidates(&self, name: &str) -> &[&'a Path] {
        self.by_stem.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Resolve `target` as written in the document at `source`.
    pub fn resolve(&self, target: &str, source: &Path) -> Resolution {
        let candidates = self.candidates(target);
        match candidates {
            [] => Resolution::Unresolved,
            [only] => Resolution::Resolved { path: only.to_path_buf() },
            many => Resolution::Ambiguous {
                candidates: many.iter().map(|p| p.to_path_buf()).collect(),
                chosen: self.pick(many, source).map(Path::to_path_buf),
            },
        }
    }

    /// Resolve to a path, discarding how the decision was reached.
    pub fn resolve_path(&self, target: &str, source: &Path) -> Option<&'a Path> {
        match self.candidates(target) {
            [] => None,
            [only] => Some(*only),
            many => self.pick(many, source),
        }
    }

    fn pick(&self, candidates: &[&'a Path], source: &Path) -> Option<&'a Path> {
        match self.policy {
            ResolutionPolicy::Lexicographic => candidates.first().copied(),
            ResolutionPolicy::SameDirectory => {
                let dir = source.parent();
                candidates
                    .iter()
                    .find(|c| c.parent() == dir)
                    .or_else(|| candidates.first())
                    .copied()
            }
            ResolutionPolicy::Strict => None,
        }
    }
}
