//! Links command implementation.

use std::path::{Path, PathBuf};

use notegraph_core::VaultIndex;
use notegraph_core::config::ResolvedConfig;
use notegraph_core::index::{OutgoingLink, Resolution};
use serde::Serialize;

use super::output::{print_json, print_notes_json, print_notes_quiet, print_notes_table, relative};
use crate::{LinksArgs, OutputFormat};

/// Both directions in one JSON document.
#[derive(Debug, Serialize)]
struct LinksOutput<'a> {
    note: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    backlinks: Option<&'a [PathBuf]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    outgoing: Option<&'a [OutgoingLink]>,
}

pub fn run(rc: &ResolvedConfig, args: LinksArgs) {
    let build = super::build(rc, None);
    let index = &build.index;
    let root = super::vault_root(rc);

    let note = match find_note(index, &root, &rc.extension, &args.note) {
        Ok(path) => path,
        Err(msg) => {
            eprintln!("{}", msg);
            std::process::exit(1);
        }
    };

    // Determine what to show (both shown by default)
    let show_backlinks = args.backlinks || !args.outlinks;
    let show_outlinks = args.outlinks || !args.backlinks;

    let backlinks = index.backlinks(&note);
    let outgoing = index.outgoing(&note, rc.index.resolution);

    let format = super::resolve_format(args.output, args.json, args.quiet);
    if let OutputFormat::Json = format {
        if show_backlinks && show_outlinks {
            print_json(&LinksOutput {
                note: &note,
                backlinks: Some(backlinks),
                outgoing: Some(outgoing.as_slice()),
            });
        } else if show_backlinks {
            let paths: Vec<&Path> = backlinks.iter().map(PathBuf::as_path).collect();
            print_notes_json(index, &paths);
        } else {
            print_json(&outgoing);
        }
        return;
    }

    let display = relative(&root, &note);

    if show_backlinks {
        let paths: Vec<&Path> = backlinks.iter().map(PathBuf::as_path).collect();
        if show_outlinks && matches!(format, OutputFormat::Table) {
            println!("=== Backlinks (notes linking to {}) ===", display);
            println!();
        }
        match format {
            OutputFormat::Quiet => print_notes_quiet(&paths),
            _ => print_notes_table(&root, index, &paths, "backlinks"),
        }
    }

    if show_outlinks {
        if show_backlinks && matches!(format, OutputFormat::Table) {
            println!();
            println!("=== Outgoing links (notes {} links to) ===", display);
            println!();
        }
        match format {
            OutputFormat::Quiet => {
                for link in &outgoing {
                    if let Some(target) = link.resolution.target() {
                        println!("{}", target.display());
                    }
                }
            }
            _ => print_outgoing_table(&root, &outgoing),
        }
    }
}

/// Locate a note by path (absolute or relative to the vault) or by name.
fn find_note(index: &VaultIndex, root: &Path, extension: &str, note: &str) -> Result<PathBuf, String> {
    let note = note.strip_prefix("./").unwrap_or(note);

    let candidate = root.join(note);
    if let Ok(path) = candidate.canonicalize()
        && index.contains(&path)
    {
        return Ok(path);
    }

    let suffix = format!(".{}", extension);
    let name = note.strip_suffix(&suffix).unwrap_or(note);
    let matches = index.find_by_name(name);
    match matches.as_slice() {
        [] => Err(format!("Note not found in vault: {}", note)),
        [only] => Ok(only.to_path_buf()),
        many => {
            let listed: Vec<String> = many.iter().map(|p| relative(root, p)).collect();
            Err(format!(
                "Note name '{}' is ambiguous, pass a path instead: {}",
                name,
                listed.join(", ")
            ))
        }
    }
}

fn print_outgoing_table(root: &Path, links: &[OutgoingLink]) {
    if links.is_empty() {
        println!("(no outgoing links found)");
        return;
    }

    let target_width =
        links.iter().map(|l| l.target.chars().count()).max().unwrap_or(6).clamp(6, 40);

    println!("{:<target_width$}  RESOLVES TO", "TARGET");
    println!("{:-<target_width$}  {:-<11}", "", "");

    for link in links {
        let resolved = match &link.resolution {
            Resolution::Resolved { path } => relative(root, path),
            Resolution::Ambiguous { chosen: Some(path), candidates } => {
                format!("{} (ambiguous, {} candidates)", relative(root, path), candidates.len())
            }
            Resolution::Ambiguous { chosen: None, candidates } => {
                format!("(ambiguous, {} candidates)", candidates.len())
            }
            Resolution::Unresolved => "(unresolved)".to_string(),
        };
        println!("{:<target_width$}  {}", link.target, resolved);
    }

    println!();
    println!("-- {} outgoing links --", links.len());
}
