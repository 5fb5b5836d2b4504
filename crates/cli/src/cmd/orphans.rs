//! Orphans command implementation.

use notegraph_core::config::ResolvedConfig;

use super::output::{print_notes_json, print_notes_quiet, print_notes_table};
use crate::{OrphansArgs, OutputFormat};

pub fn run(rc: &ResolvedConfig, args: OrphansArgs) {
    let build = super::build(rc, None);
    let orphans = build.index.orphans(rc.index.resolution);
    let root = super::vault_root(rc);

    match super::resolve_format(args.output, args.json, args.quiet) {
        OutputFormat::Table => print_notes_table(&root, &build.index, &orphans, "orphans"),
        OutputFormat::Json => print_notes_json(&build.index, &orphans),
        OutputFormat::Quiet => print_notes_quiet(&orphans),
    }
}
