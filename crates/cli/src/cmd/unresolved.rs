//! Unresolved links command implementation.

use notegraph_core::config::ResolvedConfig;
use notegraph_core::index::UnresolvedLink;
use tabled::{Table, Tabled, settings::Style};

use super::output::{print_json, relative};
use crate::{OutputFormat, UnresolvedArgs};

#[derive(Tabled)]
struct UnresolvedRow {
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Target")]
    target: String,
}

pub fn run(rc: &ResolvedConfig, args: UnresolvedArgs) {
    let build = super::build(rc, None);
    let links = build.index.unresolved_links(rc.index.resolution);

    match super::resolve_format(args.output, args.json, args.quiet) {
        OutputFormat::Table => print_table(rc, &links),
        OutputFormat::Json => print_json(&links),
        OutputFormat::Quiet => {
            for link in &links {
                println!("{}\t{}", link.source.display(), link.target);
            }
        }
    }
}

fn print_table(rc: &ResolvedConfig, links: &[UnresolvedLink]) {
    if links.is_empty() {
        println!("(no unresolved links found)");
        return;
    }

    let root = super::vault_root(rc);
    let rows: Vec<UnresolvedRow> = links
        .iter()
        .map(|l| UnresolvedRow {
            source: relative(&root, &l.source),
            target: format!("[[{}]]", l.target),
        })
        .collect();
    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{}", table);
    println!("-- {} unresolved links --", links.len());
}
