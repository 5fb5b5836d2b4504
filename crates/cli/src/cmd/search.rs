//! Search command implementation.

use notegraph_core::config::ResolvedConfig;
use notegraph_core::index::{SearchEngine, SearchQuery, SearchResult};
use notegraph_core::vault::ScanOptions;

use super::output::{print_json, relative, truncate};
use crate::{OutputFormat, SearchArgs};

pub fn run(rc: &ResolvedConfig, args: SearchArgs) {
    let query = SearchQuery { text: args.query, limit: args.limit };

    let engine = SearchEngine::with_options(&rc.vault_root, ScanOptions::from(rc));
    let results = match engine.search(&query) {
        Ok(results) => results,
        Err(e) => {
            eprintln!("Error searching: {}", e);
            std::process::exit(1);
        }
    };

    match super::resolve_format(args.output, args.json, args.quiet) {
        OutputFormat::Table => print_results_table(rc, &results),
        OutputFormat::Json => print_json(&results),
        OutputFormat::Quiet => {
            for result in &results {
                println!("{}", result.path.display());
            }
        }
    }
}

/// Print search results as a table.
fn print_results_table(rc: &ResolvedConfig, results: &[SearchResult]) {
    if results.is_empty() {
        println!("(no results found)");
        return;
    }

    let root = super::vault_root(rc);
    let paths: Vec<String> = results.iter().map(|r| relative(&root, &r.path)).collect();
    let path_width = paths.iter().map(|p| p.chars().count()).max().unwrap_or(4).clamp(4, 60);

    println!("{:<path_width$}  SCORE", "PATH");
    println!("{:-<path_width$}  {:-<5}", "", "");

    for (path, result) in paths.iter().zip(results) {
        println!("{:<path_width$}  {:>5}", truncate(path, path_width), result.score);
    }

    println!();
    println!("-- {} results --", results.len());
}
