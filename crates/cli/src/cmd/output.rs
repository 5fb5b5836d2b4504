//! Shared output formatting for query commands.

use std::path::Path;

use notegraph_core::VaultIndex;
use serde::Serialize;

/// Formatted note for JSON output.
#[derive(Debug, Serialize)]
pub struct NoteOutput {
    pub path: String,
    pub title: String,
    pub tags: Vec<String>,
    pub backlinks: usize,
}

impl NoteOutput {
    pub fn from_index(index: &VaultIndex, path: &Path) -> Self {
        let entry = index.get(path);
        Self {
            path: path.to_string_lossy().to_string(),
            title: entry.map(|e| e.title.clone()).unwrap_or_default(),
            tags: entry.map(|e| e.tags.clone()).unwrap_or_default(),
            backlinks: entry.map_or(0, |e| e.backlinks.len()),
        }
    }
}

/// Path of `path` relative to the vault root, for display.
pub fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).to_string_lossy().to_string()
}

/// Print notes as a table.
pub fn print_notes_table(root: &Path, index: &VaultIndex, paths: &[&Path], what: &str) {
    if paths.is_empty() {
        println!("(no {} found)", what);
        return;
    }

    let rows: Vec<(String, String, usize)> = paths
        .iter()
        .map(|p| {
            let entry = index.get(p);
            (
                relative(root, p),
                entry.map(|e| e.title.clone()).unwrap_or_default(),
                entry.map_or(0, |e| e.backlinks.len()),
            )
        })
        .collect();

    // Calculate column widths
    let path_width = rows.iter().map(|r| r.0.chars().count()).max().unwrap_or(4).clamp(4, 50);
    let title_width = rows.iter().map(|r| r.1.chars().count()).max().unwrap_or(5).clamp(5, 40);

    println!("{:<path_width$}  {:<title_width$}  BACKLINKS", "PATH", "TITLE");
    println!("{:-<path_width$}  {:-<title_width$}  {:-<9}", "", "", "");

    for (path, title, backlinks) in &rows {
        println!(
            "{:<path_width$}  {:<title_width$}  {}",
            truncate(path, path_width),
            truncate(title, title_width),
            backlinks,
        );
    }

    println!();
    println!("-- {} {} --", rows.len(), what);
}

/// Print notes as JSON.
pub fn print_notes_json(index: &VaultIndex, paths: &[&Path]) {
    let output: Vec<NoteOutput> = paths.iter().map(|p| NoteOutput::from_index(index, p)).collect();
    print_json(&output);
}

/// Print notes as paths only (quiet mode).
pub fn print_notes_quiet(paths: &[&Path]) {
    for path in paths {
        println!("{}", path.display());
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Truncate string with ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max_len).collect()
    }
}
