//! Tags command implementation.

use std::path::Path;

use notegraph_core::config::ResolvedConfig;
use tabled::{Table, Tabled, settings::Style};

use super::output::{print_json, print_notes_json, print_notes_quiet, print_notes_table};
use crate::{OutputFormat, TagsArgs};

/// Row for the tag summary table.
#[derive(Tabled)]
struct TagRow {
    #[tabled(rename = "Tag")]
    tag: String,
    #[tabled(rename = "Notes")]
    notes: usize,
}

pub fn run(rc: &ResolvedConfig, args: TagsArgs) {
    let build = super::build(rc, None);
    let summary = build.index.tag_summary();
    let format = super::resolve_format(args.output, args.json, args.quiet);

    let Some(tag) = args.tag else {
        match format {
            OutputFormat::Table => {
                if summary.is_empty() {
                    println!("(no tags found)");
                    return;
                }
                let rows: Vec<TagRow> = summary
                    .iter()
                    .map(|(tag, paths)| TagRow { tag: format!("#{}", tag), notes: paths.len() })
                    .collect();
                let table = Table::new(&rows).with(Style::rounded()).to_string();
                println!("{}", table);
            }
            OutputFormat::Json => print_json(&summary),
            OutputFormat::Quiet => {
                for tag in summary.keys() {
                    println!("{}", tag);
                }
            }
        }
        return;
    };

    let tag = tag.strip_prefix('#').unwrap_or(&tag);
    let paths: Vec<&Path> =
        summary.get(tag).map(|p| p.iter().map(|p| p.as_path()).collect()).unwrap_or_default();

    let root = super::vault_root(rc);
    match format {
        OutputFormat::Table => print_notes_table(&root, &build.index, &paths, "notes"),
        OutputFormat::Json => print_notes_json(&build.index, &paths),
        OutputFormat::Quiet => print_notes_quiet(&paths),
    }
}
