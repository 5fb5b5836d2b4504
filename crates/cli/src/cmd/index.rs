//! Index command implementation.

use std::io::Write;

use notegraph_core::config::ResolvedConfig;
use notegraph_core::index::ProgressCallback;

use super::output::{print_json, relative};
use crate::IndexArgs;

/// Run the index command.
pub fn run(rc: &ResolvedConfig, args: IndexArgs) {
    if args.json {
        let build = super::build(rc, None);
        print_json(&build.index);
        return;
    }

    println!("Indexing vault: {}", rc.vault_root.display());

    // Progress goes to stderr so stdout stays clean
    let progress: ProgressCallback = if args.verbose {
        Box::new(|current, total, path| {
            eprintln!("[{}/{}] {}", current, total, path);
        })
    } else {
        Box::new(|current, total, _path| {
            if current % 50 == 0 || current == total {
                eprint!("\rIndexing... {}/{}", current, total);
                std::io::stderr().flush().ok();
            }
        })
    };

    let build = super::build(rc, Some(progress));
    if !args.verbose && build.stats.files_found > 0 {
        eprintln!(); // Newline after progress
    }

    let stats = &build.stats;
    println!();
    println!("Indexing complete:");
    println!("  Files found:     {}", stats.files_found);
    println!("  Notes indexed:   {}", stats.notes_indexed);
    if stats.notes_skipped > 0 {
        println!("  Notes skipped:   {}", stats.notes_skipped);
    }
    println!("  Links indexed:   {}", stats.links_indexed);
    println!("  Links resolved:  {}", stats.links_resolved);
    println!("  Broken links:    {}", stats.broken_links);
    if stats.ambiguous_links > 0 {
        println!("  Ambiguous links: {} (policy: {})", stats.ambiguous_links, rc.index.resolution);
    }
    println!("  Duration:        {}ms", stats.duration_ms);

    if !build.skipped.is_empty() {
        let root = super::vault_root(rc);
        println!();
        println!("Skipped documents:");
        for skipped in &build.skipped {
            println!("  {}: {}", relative(&root, &skipped.path), skipped.reason);
        }
    }
}
