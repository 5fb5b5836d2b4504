use notegraph_core::config::{ConfigLoader, ResolvedConfig, default_config_path};
use std::path::Path;

use crate::logging;

pub fn run(config: Option<&Path>, profile: Option<&str>, vault: Option<&Path>) {
    let loaded = match vault {
        Some(v) => Ok(ResolvedConfig::for_vault(v)),
        None => ConfigLoader::load(config, profile),
    };

    match loaded {
        Ok(rc) => {
            logging::init(&rc);
            tracing::debug!("doctor: configuration resolved");

            println!("OK   notegraph doctor");
            match (vault, config) {
                (Some(_), _) => println!("path: (none, --vault)"),
                (None, Some(p)) => println!("path: {}", p.display()),
                (None, None) => println!("path: {}", default_config_path().display()),
            }
            println!("profile: {}", rc.active_profile);
            println!("vault_root: {}", rc.vault_root.display());
            println!("extension: {}", rc.extension);
            println!("hidden_prefix: {}", rc.hidden_prefix);
            for folder in &rc.excluded_folders {
                println!("excluded: {}", folder.display());
            }
            println!("index.resolution: {}", rc.index.resolution);
            println!("index.parallel:   {}", rc.index.parallel);
            println!("logging.level: {}", rc.logging.level);
            if let Some(ref file) = rc.logging.file {
                println!("logging.file:  {}", file.display());
            }
            if !rc.vault_root.is_dir() {
                println!("warning: vault_root does not exist or is not a directory");
            }
        }
        Err(e) => {
            println!("FAIL notegraph doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}
