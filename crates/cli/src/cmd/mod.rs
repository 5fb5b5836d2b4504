pub mod doctor;
pub mod graph;
pub mod index;
pub mod links;
pub mod orphans;
pub mod output;
pub mod parse;
pub mod search;
pub mod tags;
pub mod unresolved;

use std::path::{Path, PathBuf};

use notegraph_core::config::{ConfigLoader, ResolvedConfig};
use notegraph_core::index::{BuildOptions, IndexBuild, IndexBuilder, ProgressCallback};

use crate::OutputFormat;

/// Load the active configuration, or build a default one for `--vault`.
pub fn load_config(
    config: Option<&Path>,
    profile: Option<&str>,
    vault: Option<&Path>,
) -> ResolvedConfig {
    if let Some(vault) = vault {
        return ResolvedConfig::for_vault(vault);
    }
    match ConfigLoader::load(config, profile) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            eprintln!("Hint: pass --vault <path> to use a vault without a config file.");
            std::process::exit(1);
        }
    }
}

/// Build the index for the configured vault, exiting on a failed scan.
pub fn build(rc: &ResolvedConfig, progress: Option<ProgressCallback>) -> IndexBuild {
    let builder = IndexBuilder::with_options(&rc.vault_root, BuildOptions::from(rc));
    match builder.build(progress) {
        Ok(build) => {
            for skipped in &build.skipped {
                eprintln!("Warning: skipped {}: {}", skipped.path.display(), skipped.reason);
            }
            build
        }
        Err(e) => {
            eprintln!("Error indexing vault: {}", e);
            std::process::exit(1);
        }
    }
}

/// Canonical vault root, matching the keys of a built index.
pub fn vault_root(rc: &ResolvedConfig) -> PathBuf {
    rc.vault_root.canonicalize().unwrap_or_else(|_| rc.vault_root.clone())
}

pub fn resolve_format(output: OutputFormat, json: bool, quiet: bool) -> OutputFormat {
    if json {
        OutputFormat::Json
    } else if quiet {
        OutputFormat::Quiet
    } else {
        output
    }
}
